//! Validation engine
//!
//! A pure function from a [`TariffDraft`] to a per-field verdict. Runs after
//! every relevant edit; submission is gated on [`Verdict::is_valid`].
//!
//! Bound pairs (min/max days, min/max traffic) are not cross-checked here:
//! each bound is clamped independently at write time and the store applies
//! its own checks on the submitted payload.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::{TariffDraft, TariffMode};

/// Draft fields a validation error can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Mode,
    Name,
    DeviceLimit,
    TierLevel,
    DailyPrice,
    Pricing,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Mode => "mode",
            Field::Name => "name",
            Field::DeviceLimit => "device_limit",
            Field::TierLevel => "tier_level",
            Field::DailyPrice => "daily_price",
            Field::Pricing => "pricing",
        };
        f.write_str(name)
    }
}

/// Why a field failed. The first failing rule per field governs its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Missing,
    OutOfRange,
    MustBePositive,
    NoPricingConfigured,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::Missing => "is required",
            Reason::OutOfRange => "is out of range",
            Reason::MustBePositive => "must be greater than zero",
            Reason::NoPricingConfigured => "no pricing method configured",
        };
        f.write_str(text)
    }
}

/// Validation outcome: valid iff no field carries an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Verdict {
    pub errors: BTreeMap<Field, Reason>,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn reason_for(&self, field: Field) -> Option<Reason> {
        self.errors.get(&field).copied()
    }

    /// One-line rendering for logs and error messages.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, reason)| format!("{} {}", field, reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Derive the validity verdict for a draft. Pure; no I/O.
pub fn validate(draft: &TariffDraft) -> Verdict {
    let mut errors = BTreeMap::new();

    if draft.name.trim().is_empty() {
        errors.insert(Field::Name, Reason::Missing);
    }

    if draft.device_limit.is_none() {
        errors.insert(Field::DeviceLimit, Reason::Missing);
    }

    match draft.tier_level {
        None => {
            errors.insert(Field::TierLevel, Reason::Missing);
        }
        Some(level) if !(1..=10).contains(&level) => {
            errors.insert(Field::TierLevel, Reason::OutOfRange);
        }
        Some(_) => {}
    }

    match draft.mode {
        None => {
            errors.insert(Field::Mode, Reason::Missing);
        }
        Some(TariffMode::Daily) => match draft.daily_price_minor {
            None => {
                errors.insert(Field::DailyPrice, Reason::Missing);
            }
            Some(price) if price <= 0 => {
                errors.insert(Field::DailyPrice, Reason::MustBePositive);
            }
            Some(_) => {}
        },
        Some(TariffMode::Period) => {
            // At least one pricing path must exist: fixed periods or
            // custom day-range pricing.
            if draft.period_prices.is_empty() && !draft.custom_days.enabled {
                errors.insert(Field::Pricing, Reason::NoPricingConfigured);
            }
        }
    }

    Verdict { errors }
}
