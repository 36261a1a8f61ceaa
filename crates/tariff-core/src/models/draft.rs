//! Tariff draft aggregate
//!
//! One flat structure holding every editable field of a tariff regardless of
//! billing mode. Fields that the current mode does not use stay dormant
//! instead of being cleared, so switching mode (or toggling a feature block)
//! never loses user input. Mode-dependent filtering happens only in
//! [`crate::payload::TariffPayload::from_draft`].

use std::collections::BTreeSet;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::AppError;
use crate::AppResult;

use super::addons::{CustomDayPricing, CustomTrafficPricing, DeviceAddon, TrafficTopup};
use super::period::PeriodPriceList;
use super::record::TariffRecord;

/// Billing mode. Chosen once per editing session; fixed when editing an
/// existing tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TariffMode {
    /// Fixed-duration prepaid terms (e.g. 30 days for a fixed price)
    Period,
    /// Recurring per-day deduction from balance
    Daily,
}

impl TariffMode {
    pub fn is_daily(self) -> bool {
        matches!(self, TariffMode::Daily)
    }

    pub fn from_is_daily(is_daily: bool) -> Self {
        if is_daily {
            TariffMode::Daily
        } else {
            TariffMode::Period
        }
    }
}

/// Cadence at which a subscriber's consumed-traffic counter is zeroed.
/// `Global` defers to the service-wide setting and is `null` on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrafficResetMode {
    #[default]
    Global,
    Day,
    Week,
    Month,
    NoReset,
}

impl TrafficResetMode {
    pub const ALL: [TrafficResetMode; 5] = [
        TrafficResetMode::Global,
        TrafficResetMode::Day,
        TrafficResetMode::Week,
        TrafficResetMode::Month,
        TrafficResetMode::NoReset,
    ];

    pub fn as_wire(self) -> Option<&'static str> {
        match self {
            TrafficResetMode::Global => None,
            TrafficResetMode::Day => Some("DAY"),
            TrafficResetMode::Week => Some("WEEK"),
            TrafficResetMode::Month => Some("MONTH"),
            TrafficResetMode::NoReset => Some("NO_RESET"),
        }
    }

    pub fn from_wire(value: Option<&str>) -> Option<Self> {
        match value {
            None => Some(TrafficResetMode::Global),
            Some("DAY") => Some(TrafficResetMode::Day),
            Some("WEEK") => Some(TrafficResetMode::Week),
            Some("MONTH") => Some(TrafficResetMode::Month),
            Some("NO_RESET") => Some(TrafficResetMode::NoReset),
            Some(_) => None,
        }
    }
}

impl Serialize for TrafficResetMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_wire() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for TrafficResetMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match TrafficResetMode::from_wire(raw.as_deref()) {
            Some(mode) => Ok(mode),
            None => Err(D::Error::custom(format!(
                "unknown traffic reset mode: {:?}",
                raw
            ))),
        }
    }
}

/// The aggregate root of the tariff editor.
///
/// Monetary fields hold minor units; `None` in a numeric field means the
/// form field is blank, which is distinct from an explicit zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TariffDraft {
    /// Present iff the draft was hydrated from an existing tariff
    pub identity: Option<i64>,
    /// Unset until the user picks a billing mode for a new tariff
    pub mode: Option<TariffMode>,
    pub name: String,
    pub description: String,
    /// 0 = unlimited
    pub traffic_limit_gb: Option<u32>,
    pub device_limit: Option<u32>,
    pub tier_level: Option<u8>,
    pub daily_price_minor: Option<i64>,
    pub period_prices: PeriodPriceList,
    pub allowed_squads: BTreeSet<Uuid>,
    pub device_addon: DeviceAddon,
    pub traffic_topup: TrafficTopup,
    pub custom_days: CustomDayPricing,
    pub custom_traffic: CustomTrafficPricing,
    pub traffic_reset_mode: TrafficResetMode,
}

impl Default for TariffDraft {
    fn default() -> Self {
        Self {
            identity: None,
            mode: None,
            name: String::new(),
            description: String::new(),
            traffic_limit_gb: None,
            device_limit: Some(1),
            tier_level: Some(1),
            daily_price_minor: Some(0),
            period_prices: PeriodPriceList::new(),
            allowed_squads: BTreeSet::new(),
            device_addon: DeviceAddon::default(),
            traffic_topup: TrafficTopup::default(),
            custom_days: CustomDayPricing::default(),
            custom_traffic: CustomTrafficPricing::default(),
            traffic_reset_mode: TrafficResetMode::Global,
        }
    }
}

impl TariffDraft {
    /// Blank draft for the create flow; mode is unset until chosen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the billing mode. Rejected when the draft edits an existing
    /// tariff, whose mode is fixed by the stored record. Switching mode on a
    /// new draft leaves every other field untouched; the other mode's fields
    /// simply go dormant.
    pub fn set_mode(&mut self, mode: TariffMode) -> AppResult<()> {
        if self.identity.is_some() {
            return Err(AppError::Conflict(
                "billing mode is fixed for an existing tariff".to_string(),
            ));
        }
        self.mode = Some(mode);
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_traffic_limit_gb(&mut self, gb: Option<u32>) {
        self.traffic_limit_gb = gb;
    }

    pub fn set_device_limit(&mut self, limit: Option<u32>) {
        self.device_limit = limit.map(|v| v.max(1));
    }

    pub fn set_tier_level(&mut self, level: Option<u8>) {
        self.tier_level = level.map(|v| v.clamp(1, 10));
    }

    pub fn set_daily_price_minor(&mut self, price: Option<i64>) {
        self.daily_price_minor = price.map(|p| p.max(0));
    }

    pub fn set_traffic_reset_mode(&mut self, mode: TrafficResetMode) {
        self.traffic_reset_mode = mode;
    }

    /// Symmetric difference on the allow-list: selects the squad if absent,
    /// deselects it if present. Returns whether it is selected afterwards.
    pub fn toggle_server(&mut self, squad_uuid: Uuid) -> bool {
        if self.allowed_squads.insert(squad_uuid) {
            true
        } else {
            self.allowed_squads.remove(&squad_uuid);
            false
        }
    }

    /// Bulk-assign every field from a fetched record, overwriting any local
    /// edits (last fetch wins). Null or absent optionals take their
    /// documented defaults.
    pub fn hydrate(&mut self, record: &TariffRecord) {
        self.identity = Some(record.id);
        self.mode = Some(TariffMode::from_is_daily(record.is_daily));
        self.name = record.name.clone();
        self.description = record.description.clone().unwrap_or_default();
        self.traffic_limit_gb = Some(record.traffic_limit_gb.unwrap_or(100));
        self.device_limit = Some(record.device_limit.filter(|&v| v > 0).unwrap_or(1));
        self.tier_level = Some(record.tier_level.filter(|&v| v > 0).unwrap_or(1));
        self.daily_price_minor = Some(record.daily_price_minor.unwrap_or(0));
        self.period_prices = PeriodPriceList::from_entries(record.period_prices.clone());
        self.allowed_squads = record.allowed_squads.iter().copied().collect();
        self.device_addon = DeviceAddon {
            price_minor: Some(record.device_price_minor.unwrap_or(0)),
            max_device_limit: Some(record.max_device_limit.unwrap_or(0)),
        };
        self.traffic_topup = TrafficTopup {
            enabled: record.traffic_topup_enabled,
            max_topup_traffic_gb: Some(record.max_topup_traffic_gb.unwrap_or(0)),
            packages: record.traffic_topup_packages.clone(),
        };
        self.custom_days = CustomDayPricing {
            enabled: record.custom_days_enabled,
            price_per_day_minor: Some(record.price_per_day_minor.unwrap_or(0)),
            min_days: Some(record.min_days.filter(|&v| v > 0).unwrap_or(1)),
            max_days: Some(record.max_days.filter(|&v| v > 0).unwrap_or(365)),
        };
        self.custom_traffic = CustomTrafficPricing {
            enabled: record.custom_traffic_enabled,
            price_per_gb_minor: Some(record.price_per_gb_minor.unwrap_or(0)),
            min_traffic_gb: Some(record.min_traffic_gb.filter(|&v| v > 0).unwrap_or(1)),
            max_traffic_gb: Some(record.max_traffic_gb.filter(|&v| v > 0).unwrap_or(1000)),
        };
        self.traffic_reset_mode = record.traffic_reset_mode;
    }
}
