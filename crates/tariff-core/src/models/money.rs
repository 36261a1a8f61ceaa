//! Monetary unit conversion and form-input coercion
//!
//! All prices are stored and transmitted in integer minor units (hundredths
//! of the display currency). Users enter and read prices in major units.
//! This module is the single place where that boundary is crossed.

use rust_decimal::prelude::*;
use std::str::FromStr;

/// Minor units per major display unit (e.g. cents per whole unit)
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Convert a major-unit amount to integer minor units, rounding to nearest.
pub fn major_to_minor(major: Decimal) -> i64 {
    let minor = (major * Decimal::from(MINOR_UNITS_PER_MAJOR))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    minor.to_i64().unwrap_or(i64::MAX)
}

/// Convert stored minor units back to the major-unit display value.
pub fn minor_to_major(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

/// Coerce raw text from a monetary input field into minor units.
///
/// Blank input is a distinct state (`None`) so the form can show a
/// "required" hint; it is collapsed to zero only at serialization time.
/// Unparseable text and negative amounts coerce to zero.
pub fn parse_major_input(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let major = Decimal::from_str(trimmed).unwrap_or(Decimal::ZERO);
    Some(major_to_minor(major.max(Decimal::ZERO)))
}

/// Coerce raw text from a count input field (days, GB, devices) into an
/// integer clamped to `[min, max]`. Blank input stays blank.
pub fn parse_count_input(input: &str, min: u32, max: Option<u32>) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value = trimmed.parse::<u32>().unwrap_or(min).max(min);
    Some(match max {
        Some(upper) => value.min(upper),
        None => value,
    })
}
