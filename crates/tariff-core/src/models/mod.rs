//! Domain models for tariff configuration

pub mod addons;
pub mod draft;
pub mod money;
pub mod period;
pub mod record;
pub mod server;

pub use addons::{
    CustomDayPricing, CustomTrafficPricing, DeviceAddon, TrafficTopup, TOPUP_PACKAGE_SIZES_GB,
};
pub use draft::{TariffDraft, TariffMode, TrafficResetMode};
pub use period::{PeriodPrice, PeriodPriceList};
pub use record::TariffRecord;
pub use server::ServerInfo;
