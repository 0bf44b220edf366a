//! Simple and exponential moving averages.
//!
//! SMA: rolling mean over `period` values, first valid value at index period-1.
//! EMA: EMA[0] = x[0], EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1] with
//! alpha = 2 / (span + 1). Defined at every index, no warm-up gap; MACD
//! relies on that.

use super::indicator::Indicator;
use crate::domain::PriceSeries;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, series: &PriceSeries) -> Vec<f64> {
        sma_of_series(&series.closes(), self.period)
    }
}

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, series: &PriceSeries) -> Vec<f64> {
        ema_of_series(&series.closes(), self.span)
    }
}

/// Rolling mean of `values` over `period`.
///
/// Any window containing a NaN yields NaN.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    // Initial window sum
    let mut sum = 0.0;
    let mut nan_in_window = false;
    for &v in values.iter().take(period) {
        if v.is_nan() {
            nan_in_window = true;
        }
        sum += v;
    }

    if !nan_in_window {
        result[period - 1] = sum / period as f64;
    }

    // Roll the window forward
    for i in period..n {
        let leaving = values[i - period];
        let entering = values[i];
        sum = sum - leaving + entering;

        // A NaN poisons the running sum; rescan the window to recover once
        // it has left.
        if entering.is_nan() || leaving.is_nan() || nan_in_window {
            nan_in_window = false;
            sum = 0.0;
            for &v in &values[(i + 1 - period)..=i] {
                if v.is_nan() {
                    nan_in_window = true;
                }
                sum += v;
            }
            if nan_in_window {
                continue;
            }
        }

        result[i] = sum / period as f64;
    }

    result
}

/// Exponential moving average of `values`, seeded with `values[0]`.
///
/// Once a NaN is seen every later value is NaN.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n == 0 || span == 0 || values[0].is_nan() {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    result[0] = prev;

    for i in 1..n {
        if values[i].is_nan() {
            return result;
        }
        // Incremental form keeps a constant input exactly constant.
        let ema = prev + alpha * (values[i] - prev);
        result[i] = ema;
        prev = ema;
    }

    result
}
