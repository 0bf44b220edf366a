//! Indicator engines.
//!
//! Every single-series indicator implements [`Indicator`]. MACD produces
//! three aligned series and is exposed as its own type.
//!
//! Slice-level functions (`sma_of_series`, `ema_of_series`, ...) are public
//! so composed indicators can run on derived series rather than closes.

pub mod indicator;
pub mod macd;
pub mod moving_average;
pub mod returns;
pub mod rsi;
pub mod volatility;

pub use indicator::{Indicator, IndicatorSet};
pub use macd::{Macd, MacdOutput};
pub use moving_average::{ema_of_series, sma_of_series, Ema, Sma};
pub use returns::{cumulative_returns, daily_returns, CumulativeReturn, DailyReturn};
pub use rsi::{rsi_of_series, Rsi};
pub use volatility::{rolling_std, RollingVolatility};

/// Create a price series of consecutive days from closes, for tests.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> crate::domain::PriceSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    crate::domain::PriceSeries::from_closes("TEST", base_date, closes).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
