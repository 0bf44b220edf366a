//! Bar: one day's closing price observation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily close for a single symbol on a single trading date.
///
/// Bars are created by the provider adapter and never mutated afterwards.
/// A `Bar` inside a [`PriceSeries`](super::PriceSeries) always has a finite,
/// positive close; a standalone `Bar` makes no such promise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// True if the close can be used as a return denominator.
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}
