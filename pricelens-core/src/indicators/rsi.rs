//! Relative Strength Index (RSI), simple-average variant.
//!
//! avg_gain / avg_loss are plain rolling means of the last `period` gains and
//! losses (not Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge cases: avg_loss == 0 and avg_gain > 0 → 100; both zero → undefined.

use super::indicator::Indicator;
use crate::domain::PriceSeries;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Vec<f64> {
        rsi_of_series(&series.closes(), self.period)
    }
}

/// RSI over an arbitrary value series.
///
/// Each window sum is taken directly rather than rolled, so a window with no
/// movement sums to exactly zero and is reported as undefined.
pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n <= period {
        return result;
    }

    // Price changes; index 0 has no predecessor
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let delta = values[i] - values[i - 1];
        if !delta.is_nan() {
            gains[i] = delta.max(0.0);
            losses[i] = (-delta).max(0.0);
        }
    }

    for i in period..n {
        let window = (i + 1 - period)..=i;
        let gain_window = &gains[window.clone()];
        let loss_window = &losses[window];
        if gain_window.iter().any(|g| g.is_nan()) {
            continue;
        }
        let avg_gain = gain_window.iter().sum::<f64>() / period as f64;
        let avg_loss = loss_window.iter().sum::<f64>() / period as f64;
        result[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    result
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            f64::NAN // no movement in the window
        } else {
            100.0
        }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
