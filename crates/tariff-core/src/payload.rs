//! Payload normalization
//!
//! Converts a [`TariffDraft`] into the create/update request shape. This is
//! where mode-dependent field stripping happens: the draft keeps every field,
//! the payload carries only what the selected billing mode defines, with
//! blank inputs collapsed to their documented defaults. Deterministic and
//! free of I/O.

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{PeriodPrice, TariffDraft, TariffMode, TrafficResetMode};
use crate::AppResult;

/// Create/update request body for the tariff store.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct TariffPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub traffic_limit_gb: u32,
    pub device_limit: u32,
    /// Omitted when unset or zero; the wire distinguishes "unset" from
    /// an explicit zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_price_minor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_device_limit: Option<u32>,
    #[validate(range(min = 1, max = 10))]
    pub tier_level: u8,
    pub allowed_squads: Vec<Uuid>,
    pub traffic_topup_enabled: bool,
    pub traffic_topup_packages: BTreeMap<u32, i64>,
    pub max_topup_traffic_gb: u32,
    pub traffic_reset_mode: TrafficResetMode,
    pub is_daily: bool,
    #[serde(flatten)]
    pub terms: BillingTerms,
}

/// Mode-dependent part of the payload. Daily tariffs carry no custom
/// day/traffic fields at all; period tariffs carry both custom blocks in
/// full, enabled or not (the store ignores disabled blocks' numbers).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BillingTerms {
    Daily {
        daily_price_minor: i64,
        period_prices: Vec<PeriodPrice>,
    },
    Period {
        daily_price_minor: i64,
        period_prices: Vec<PeriodPrice>,
        custom_days_enabled: bool,
        price_per_day_minor: i64,
        min_days: u32,
        max_days: u32,
        custom_traffic_enabled: bool,
        price_per_gb_minor: i64,
        min_traffic_gb: u32,
        max_traffic_gb: u32,
    },
}

impl TariffPayload {
    /// Normalize a draft into the request body. The only failure is a draft
    /// whose billing mode was never selected.
    pub fn from_draft(draft: &TariffDraft) -> AppResult<Self> {
        let mode = draft
            .mode
            .ok_or_else(|| AppError::MissingField("mode".to_string()))?;

        let description = {
            let trimmed = draft.description.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        let terms = match mode {
            TariffMode::Daily => BillingTerms::Daily {
                daily_price_minor: draft.daily_price_minor.unwrap_or(0),
                period_prices: Vec::new(),
            },
            TariffMode::Period => BillingTerms::Period {
                daily_price_minor: 0,
                period_prices: draft
                    .period_prices
                    .entries()
                    .iter()
                    .copied()
                    .filter(|p| p.price_minor >= 0)
                    .collect(),
                custom_days_enabled: draft.custom_days.enabled,
                price_per_day_minor: draft.custom_days.price_per_day_minor.unwrap_or(0),
                min_days: draft.custom_days.min_days.unwrap_or(1),
                max_days: draft.custom_days.max_days.unwrap_or(365),
                custom_traffic_enabled: draft.custom_traffic.enabled,
                price_per_gb_minor: draft.custom_traffic.price_per_gb_minor.unwrap_or(0),
                min_traffic_gb: draft.custom_traffic.min_traffic_gb.unwrap_or(1),
                max_traffic_gb: draft.custom_traffic.max_traffic_gb.unwrap_or(1000),
            },
        };

        Ok(Self {
            name: draft.name.clone(),
            description,
            traffic_limit_gb: draft.traffic_limit_gb.unwrap_or(0),
            device_limit: draft.device_limit.unwrap_or(1),
            device_price_minor: draft.device_addon.price_minor.filter(|&p| p > 0),
            max_device_limit: draft.device_addon.max_device_limit.filter(|&m| m > 0),
            tier_level: draft.tier_level.unwrap_or(1),
            allowed_squads: draft.allowed_squads.iter().copied().collect(),
            traffic_topup_enabled: draft.traffic_topup.enabled,
            traffic_topup_packages: draft.traffic_topup.packages.clone(),
            max_topup_traffic_gb: draft.traffic_topup.max_topup_traffic_gb.unwrap_or(0),
            traffic_reset_mode: draft.traffic_reset_mode,
            is_daily: mode.is_daily(),
            terms,
        })
    }
}
