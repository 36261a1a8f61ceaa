//! Period price list for prepaid tariffs
//!
//! An ordered collection of (duration in days, price) entries. The list is
//! kept sorted ascending by day count and never contains two entries for the
//! same duration; `add` is the sole guard enforcing that.

use serde::{Deserialize, Serialize};

/// A single prepaid term: a duration in days and its price in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPrice {
    pub days: u32,
    pub price_minor: i64,
}

/// Sorted, duplicate-free list of period prices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodPriceList(Vec<PeriodPrice>);

impl PeriodPriceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the list from stored entries, e.g. when hydrating a fetched
    /// record. Keeps the first entry per day count and re-sorts.
    pub fn from_entries(entries: Vec<PeriodPrice>) -> Self {
        let mut inner: Vec<PeriodPrice> = Vec::with_capacity(entries.len());
        for entry in entries {
            if inner.iter().all(|p| p.days != entry.days) {
                inner.push(entry);
            }
        }
        inner.sort_by_key(|p| p.days);
        Self(inner)
    }

    /// Insert a new period. Duplicate day counts, zero durations, and
    /// non-positive prices are silently rejected (a double-click is an
    /// expected user action, not a fault). Returns whether an entry was added.
    pub fn add(&mut self, days: u32, price_minor: i64) -> bool {
        if days == 0 || price_minor <= 0 || self.contains_days(days) {
            return false;
        }
        self.0.push(PeriodPrice { days, price_minor });
        self.0.sort_by_key(|p| p.days);
        true
    }

    /// Remove the entry with the given day count, if present.
    pub fn remove(&mut self, days: u32) -> bool {
        let before = self.0.len();
        self.0.retain(|p| p.days != days);
        self.0.len() != before
    }

    /// Replace the price of an existing entry, clamped to >= 0.
    /// No-op when the day count is not present.
    pub fn update_price(&mut self, days: u32, price_minor: i64) -> bool {
        match self.0.iter_mut().find(|p| p.days == days) {
            Some(entry) => {
                entry.price_minor = price_minor.max(0);
                true
            }
            None => false,
        }
    }

    pub fn contains_days(&self, days: u32) -> bool {
        self.0.iter().any(|p| p.days == days)
    }

    pub fn entries(&self) -> &[PeriodPrice] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
