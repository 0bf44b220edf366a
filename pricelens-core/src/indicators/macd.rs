//! Moving Average Convergence Divergence (MACD).
//!
//! Three outputs:
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal), seeded with line[0]
//! - Histogram: line - signal
//!
//! All three are full length because the EMAs have no warm-up gap.

use super::moving_average::ema_of_series;
use crate::domain::{DerivedSeries, PriceSeries};

#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdOutput {
    /// Split into the named series `macd`, `signal_line`, `macd_histogram`.
    pub fn into_derived(self) -> [DerivedSeries; 3] {
        [
            DerivedSeries::new("macd", self.macd),
            DerivedSeries::new("signal_line", self.signal),
            DerivedSeries::new("macd_histogram", self.histogram),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD spans must be >= 1"
        );
        Self { fast, slow, signal }
    }

    pub fn compute(&self, series: &PriceSeries) -> MacdOutput {
        self.compute_values(&series.closes())
    }

    pub fn compute_values(&self, closes: &[f64]) -> MacdOutput {
        let fast = ema_of_series(closes, self.fast);
        let slow = ema_of_series(closes, self.slow);
        self.from_emas(&fast, &slow)
    }

    /// Build MACD from already computed fast and slow EMAs.
    pub fn from_emas(&self, fast: &[f64], slow: &[f64]) -> MacdOutput {
        let macd: Vec<f64> = fast.iter().zip(slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&macd, self.signal);
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();
        MacdOutput {
            macd,
            signal,
            histogram,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}
