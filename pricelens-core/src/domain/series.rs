//! Price series and derived series.
//!
//! A `PriceSeries` is the validated input of the engine; a `DerivedSeries` is
//! any numeric output positionally aligned to it.

use super::bar::Bar;
use crate::error::AnalysisError;
use chrono::NaiveDate;
use serde::Serialize;

/// Ordered daily closes for one symbol.
///
/// Invariants (checked by [`PriceSeries::new`]):
/// - at least one bar
/// - dates strictly increasing (no duplicates)
/// - every close finite and > 0
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, AnalysisError> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(AnalysisError::EmptySeries { symbol });
        }

        for (index, bar) in bars.iter().enumerate() {
            if !bar.is_valid() {
                return Err(AnalysisError::InvalidPrice {
                    symbol,
                    index,
                    date: bar.date,
                    value: Some(bar.close),
                });
            }
            if index > 0 && bar.date <= bars[index - 1].date {
                return Err(AnalysisError::UnorderedDates {
                    symbol,
                    index,
                    date: bar.date,
                });
            }
        }

        Ok(Self { symbol, bars })
    }

    /// Build a series of consecutive calendar days starting at `start`.
    pub fn from_closes(
        symbol: impl Into<String>,
        start: NaiveDate,
        closes: &[f64],
    ) -> Result<Self, AnalysisError> {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar::new(start + chrono::Duration::days(i as i64), close))
            .collect();
        Self::new(symbol, bars)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    /// Index of the bar dated `date`, if present.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.bars.binary_search_by_key(&date, |b| b.date).ok()
    }

    /// Deterministic BLAKE3 hash over symbol, dates and closes.
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.symbol.as_bytes());
        for bar in &self.bars {
            hasher.update(bar.date.to_string().as_bytes());
            hasher.update(&bar.close.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Keep only bars whose dates appear in `dates` (which must be sorted).
    ///
    /// Returns `None` if nothing survives.
    pub(crate) fn restrict_to(&self, dates: &[NaiveDate]) -> Option<PriceSeries> {
        let bars: Vec<Bar> = self
            .bars
            .iter()
            .filter(|b| dates.binary_search(&b.date).is_ok())
            .copied()
            .collect();
        if bars.is_empty() {
            return None;
        }
        Some(PriceSeries {
            symbol: self.symbol.clone(),
            bars,
        })
    }
}

/// Named numeric series aligned 1:1 with a `PriceSeries`.
///
/// Undefined entries (warm-up, singularities) are `f64::NAN`; the series is
/// never shortened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl DerivedSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, `None` when out of range or undefined.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().filter(|v| !v.is_nan())
    }

    /// Number of undefined entries before the first defined one.
    pub fn leading_undefined(&self) -> usize {
        self.values.iter().take_while(|v| v.is_nan()).count()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Value at the last index, `None` if it is undefined.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().filter(|v| !v.is_nan())
    }

    /// Last defined value anywhere in the series.
    pub fn last_defined(&self) -> Option<f64> {
        self.values.iter().rev().copied().find(|v| !v.is_nan())
    }
}
