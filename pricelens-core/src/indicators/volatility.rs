//! Rolling annualized volatility of daily returns.
//!
//! vol[t] = sample_std(daily_return[t-window+1..=t]) * sqrt(trading_days)
//! A window containing an undefined return is undefined. daily_return[0] is
//! always undefined, so the first value is at index `window`.
//! Lookback: window.

use super::indicator::Indicator;
use super::returns::daily_returns;
use crate::domain::PriceSeries;
use crate::stats::sample_std_dev;

#[derive(Debug, Clone)]
pub struct RollingVolatility {
    window: usize,
    trading_days: usize,
    name: String,
}

impl RollingVolatility {
    pub fn new(window: usize, trading_days: usize) -> Self {
        assert!(window >= 2, "volatility window must be >= 2");
        assert!(trading_days >= 1, "trading days must be >= 1");
        Self {
            window,
            trading_days,
            name: format!("volatility_{window}"),
        }
    }
}

impl Indicator for RollingVolatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, series: &PriceSeries) -> Vec<f64> {
        let returns = daily_returns(&series.closes());
        let factor = (self.trading_days as f64).sqrt();
        rolling_std(&returns, self.window)
            .into_iter()
            .map(|s| s * factor)
            .collect()
    }
}

/// Rolling sample standard deviation; NaN anywhere in the window gives NaN.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window < 2 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        if let Some(std) = sample_std_dev(slice) {
            result[i] = std;
        }
    }

    result
}
