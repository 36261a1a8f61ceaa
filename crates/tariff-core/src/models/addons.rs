//! Optional feature blocks attached to a tariff
//!
//! Each block keeps its numeric sub-fields when toggled off so a user never
//! loses entered values; validation and serialization decide what counts.
//! Blank numeric fields are `None`, which is distinct from an explicit zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Purchasable top-up package sizes offered by the console, in GB.
pub const TOPUP_PACKAGE_SIZES_GB: [u32; 4] = [5, 10, 20, 50];

/// Extra-device pricing. Always present; zero price and zero limit make it
/// a no-op (0 limit = unbounded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAddon {
    pub price_minor: Option<i64>,
    pub max_device_limit: Option<u32>,
}

impl Default for DeviceAddon {
    fn default() -> Self {
        Self {
            price_minor: Some(0),
            max_device_limit: Some(0),
        }
    }
}

impl DeviceAddon {
    pub fn set_price_minor(&mut self, price: Option<i64>) {
        self.price_minor = price.map(|p| p.max(0));
    }

    pub fn set_max_device_limit(&mut self, limit: Option<u32>) {
        self.max_device_limit = limit;
    }
}

/// Purchasable traffic top-up packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficTopup {
    pub enabled: bool,
    pub max_topup_traffic_gb: Option<u32>,
    /// Package size in GB -> price in minor units
    pub packages: BTreeMap<u32, i64>,
}

impl Default for TrafficTopup {
    fn default() -> Self {
        Self {
            enabled: false,
            max_topup_traffic_gb: Some(0),
            packages: BTreeMap::new(),
        }
    }
}

impl TrafficTopup {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_max_topup_traffic_gb(&mut self, gb: Option<u32>) {
        self.max_topup_traffic_gb = gb;
    }

    /// Set the price of one catalog package. Sizes outside
    /// [`TOPUP_PACKAGE_SIZES_GB`] are ignored. Returns whether a price was set.
    pub fn set_package_price(&mut self, size_gb: u32, price_minor: i64) -> bool {
        if !TOPUP_PACKAGE_SIZES_GB.contains(&size_gb) {
            return false;
        }
        self.packages.insert(size_gb, price_minor.max(0));
        true
    }

    pub fn package_price(&self, size_gb: u32) -> i64 {
        self.packages.get(&size_gb).copied().unwrap_or(0)
    }
}

/// Custom day-range pricing (period tariffs only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDayPricing {
    pub enabled: bool,
    pub price_per_day_minor: Option<i64>,
    pub min_days: Option<u32>,
    pub max_days: Option<u32>,
}

impl Default for CustomDayPricing {
    fn default() -> Self {
        Self {
            enabled: false,
            price_per_day_minor: Some(0),
            min_days: Some(1),
            max_days: Some(365),
        }
    }
}

impl CustomDayPricing {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_price_per_day_minor(&mut self, price: Option<i64>) {
        self.price_per_day_minor = price.map(|p| p.max(0));
    }

    // Each bound is clamped to >= 1 independently; max >= min is not a
    // write-time correction.
    pub fn set_min_days(&mut self, days: Option<u32>) {
        self.min_days = days.map(|d| d.max(1));
    }

    pub fn set_max_days(&mut self, days: Option<u32>) {
        self.max_days = days.map(|d| d.max(1));
    }
}

/// Custom traffic-volume pricing (period tariffs only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTrafficPricing {
    pub enabled: bool,
    pub price_per_gb_minor: Option<i64>,
    pub min_traffic_gb: Option<u32>,
    pub max_traffic_gb: Option<u32>,
}

impl Default for CustomTrafficPricing {
    fn default() -> Self {
        Self {
            enabled: false,
            price_per_gb_minor: Some(0),
            min_traffic_gb: Some(1),
            max_traffic_gb: Some(1000),
        }
    }
}

impl CustomTrafficPricing {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_price_per_gb_minor(&mut self, price: Option<i64>) {
        self.price_per_gb_minor = price.map(|p| p.max(0));
    }

    pub fn set_min_traffic_gb(&mut self, gb: Option<u32>) {
        self.min_traffic_gb = gb.map(|g| g.max(1));
    }

    pub fn set_max_traffic_gb(&mut self, gb: Option<u32>) {
        self.max_traffic_gb = gb.map(|g| g.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topup_toggle_preserves_packages() {
        let mut topup = TrafficTopup::default();
        topup.set_enabled(true);
        assert!(topup.set_package_price(10, 150_00));
        assert!(topup.set_package_price(50, 600_00));

        topup.set_enabled(false);
        topup.set_enabled(true);

        assert_eq!(topup.package_price(10), 150_00);
        assert_eq!(topup.package_price(50), 600_00);
    }

    #[test]
    fn test_topup_rejects_off_catalog_sizes() {
        let mut topup = TrafficTopup::default();
        assert!(!topup.set_package_price(7, 100_00));
        assert!(topup.packages.is_empty());
    }

    #[test]
    fn test_topup_price_clamped() {
        let mut topup = TrafficTopup::default();
        topup.set_package_price(5, -100);
        assert_eq!(topup.package_price(5), 0);
    }

    #[test]
    fn test_custom_days_clamping() {
        let mut custom = CustomDayPricing::default();
        custom.set_price_per_day_minor(Some(-50));
        custom.set_min_days(Some(0));
        custom.set_max_days(None);

        assert_eq!(custom.price_per_day_minor, Some(0));
        assert_eq!(custom.min_days, Some(1));
        assert_eq!(custom.max_days, None);
    }

    #[test]
    fn test_bounds_not_cross_corrected_at_write_time() {
        let mut custom = CustomTrafficPricing::default();
        custom.set_min_traffic_gb(Some(500));
        custom.set_max_traffic_gb(Some(10));

        assert_eq!(custom.min_traffic_gb, Some(500));
        assert_eq!(custom.max_traffic_gb, Some(10));
    }

    #[test]
    fn test_device_addon_defaults_are_noop() {
        let addon = DeviceAddon::default();
        assert_eq!(addon.price_minor, Some(0));
        assert_eq!(addon.max_device_limit, Some(0));
    }
}
