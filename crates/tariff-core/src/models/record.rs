//! Persisted tariff shape returned by the store
//!
//! Optional fields are nullable on the wire; [`crate::models::TariffDraft::hydrate`]
//! applies the per-field defaults when loading one of these for editing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::draft::TrafficResetMode;
use super::period::PeriodPrice;

/// Full persisted tariff as stored remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_daily: bool,
    pub traffic_limit_gb: Option<u32>,
    pub device_limit: Option<u32>,
    pub device_price_minor: Option<i64>,
    pub max_device_limit: Option<u32>,
    pub tier_level: Option<u8>,
    #[serde(default)]
    pub period_prices: Vec<PeriodPrice>,
    #[serde(default)]
    pub allowed_squads: Vec<Uuid>,
    pub daily_price_minor: Option<i64>,
    #[serde(default)]
    pub traffic_topup_enabled: bool,
    pub max_topup_traffic_gb: Option<u32>,
    #[serde(default)]
    pub traffic_topup_packages: BTreeMap<u32, i64>,
    #[serde(default)]
    pub traffic_reset_mode: TrafficResetMode,
    #[serde(default)]
    pub custom_days_enabled: bool,
    pub price_per_day_minor: Option<i64>,
    pub min_days: Option<u32>,
    pub max_days: Option<u32>,
    #[serde(default)]
    pub custom_traffic_enabled: bool,
    pub price_per_gb_minor: Option<i64>,
    pub min_traffic_gb: Option<u32>,
    pub max_traffic_gb: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
