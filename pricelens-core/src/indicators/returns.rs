//! Daily and cumulative returns.
//!
//! daily_return[t] = close[t] / close[t-1] - 1, undefined at t = 0.
//! cumulative_return[t] = prod(1 + daily_return[k], k = 1..=t), 1.0 at t = 0.
//!
//! `cumulative_return` is a growth factor: the net return since the first
//! bar is `cumulative_return[t] - 1`.

use super::indicator::Indicator;
use crate::domain::PriceSeries;

/// Simple daily returns of a close series.
///
/// A return is undefined when either close is NaN or the previous close is
/// not a positive finite number.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; closes.len()];
    for i in 1..closes.len() {
        let prev = closes[i - 1];
        let curr = closes[i];
        if prev.is_finite() && prev > 0.0 && !curr.is_nan() {
            result[i] = curr / prev - 1.0;
        }
    }
    result
}

/// Compounded growth factor from daily returns.
///
/// An undefined return contributes a multiplier of 1.0 rather than
/// poisoning every later value.
pub fn cumulative_returns(daily: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(daily.len());
    let mut growth = 1.0;
    for (i, &r) in daily.iter().enumerate() {
        if i > 0 && !r.is_nan() {
            growth *= 1.0 + r;
        }
        result.push(growth);
    }
    result
}

#[derive(Debug, Clone, Default)]
pub struct DailyReturn;

impl Indicator for DailyReturn {
    fn name(&self) -> &str {
        "daily_return"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, series: &PriceSeries) -> Vec<f64> {
        daily_returns(&series.closes())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CumulativeReturn;

impl Indicator for CumulativeReturn {
    fn name(&self) -> &str {
        "cumulative_return"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, series: &PriceSeries) -> Vec<f64> {
        cumulative_returns(&daily_returns(&series.closes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn daily_returns_known_values() {
        let series = make_series(&[100.0, 102.0, 101.0, 105.0, 103.0]);
        let r = DailyReturn.compute(&series);
        assert_eq!(r.len(), 5);
        assert!(r[0].is_nan());
        assert_approx(r[1], 0.02, DEFAULT_EPSILON);
        assert_approx(r[2], 101.0 / 102.0 - 1.0, DEFAULT_EPSILON);
        assert_approx(r[3], 105.0 / 101.0 - 1.0, DEFAULT_EPSILON);
        assert_approx(r[4], 103.0 / 105.0 - 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn cumulative_matches_price_ratio() {
        let series = make_series(&[100.0, 102.0, 101.0, 105.0, 103.0]);
        let c = CumulativeReturn.compute(&series);
        assert_eq!(c[0], 1.0);
        assert_approx(c[4], 1.03, 1e-12);
        assert_approx(c[4] - 1.0, 0.03, 1e-12);
    }

    #[test]
    fn zero_denominator_is_undefined_not_error() {
        let r = daily_returns(&[100.0, 0.0, 50.0]);
        assert_approx(r[1], -1.0, DEFAULT_EPSILON);
        assert!(r[2].is_nan());
    }

    #[test]
    fn undefined_return_is_neutral_in_product() {
        let c = cumulative_returns(&[f64::NAN, 0.1, f64::NAN, 0.1]);
        assert_approx(c[1], 1.1, DEFAULT_EPSILON);
        assert_approx(c[2], 1.1, DEFAULT_EPSILON);
        assert_approx(c[3], 1.21, DEFAULT_EPSILON);
    }

    #[test]
    fn single_bar_has_no_returns() {
        let series = make_series(&[100.0]);
        assert!(DailyReturn.compute(&series)[0].is_nan());
        assert_eq!(CumulativeReturn.compute(&series), vec![1.0]);
    }
}
