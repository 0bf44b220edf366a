//! Indicator trait and the named-series container produced by a run.
//!
//! Indicators are pure functions: price series in, numeric series out.
//! Output is always the same length as the input.

use crate::domain::{DerivedSeries, PriceSeries};
use chrono::NaiveDate;
use serde::Serialize;

/// Trait for single-series indicators.
///
/// The first `lookback()` values of `compute` are `f64::NAN` (warm-up).
///
/// # Look-ahead guard
/// No value at index t may depend on a close at index t+1 or later.
pub trait Indicator: Send + Sync {
    /// Series name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading undefined entries on a clean series.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole series.
    fn compute(&self, series: &PriceSeries) -> Vec<f64>;

    /// Compute and attach the indicator's name.
    fn derive(&self, series: &PriceSeries) -> DerivedSeries {
        DerivedSeries::new(self.name(), self.compute(series))
    }
}

/// Named derived series sharing one date axis, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorSet {
    dates: Vec<NaiveDate>,
    series: Vec<DerivedSeries>,
}

impl IndicatorSet {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            series: Vec::new(),
        }
    }

    /// Insert a series, replacing any existing one with the same name.
    ///
    /// # Panics
    /// If the series length differs from the date axis. Every engine output
    /// is aligned by construction, so a mismatch is a bug.
    pub fn insert(&mut self, series: DerivedSeries) {
        assert_eq!(
            series.len(),
            self.dates.len(),
            "series '{}' is not aligned to the date axis",
            series.name
        );
        match self.series.iter_mut().find(|s| s.name == series.name) {
            Some(existing) => *existing = series,
            None => self.series.push(series),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn get(&self, name: &str) -> Option<&DerivedSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Value of series `name` at `index`, `None` when missing or undefined.
    pub fn value(&self, name: &str, index: usize) -> Option<f64> {
        self.get(name).and_then(|s| s.get(index))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DerivedSeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
