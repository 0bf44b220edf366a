//! PriceLens Core: price series, indicator engines, risk summary, data providers.
//!
//! This crate contains the analysis engine:
//! - Domain types (bars, validated price series, derived series, fundamentals)
//! - Indicator engines (returns, SMA/EMA, RSI, MACD, rolling volatility)
//! - Risk and performance summary over a finished run
//! - Data providers (Yahoo Finance, CSV files, synthetic walk) behind one trait
//!
//! Every derived series is positionally aligned with its input; undefined
//! entries are `f64::NAN`, never dropped.

pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod risk;
pub mod stats;

pub use analysis::{analyze, analyze_many, compute_indicators, AnalysisReport};
pub use config::{AnalysisConfig, HistoryPolicy};
pub use domain::{Bar, DerivedSeries, Fundamentals, PriceSeries};
pub use error::AnalysisError;
pub use risk::SummaryReport;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a parallel run shares is Send + Sync.
    ///
    /// `analyze_many` fans out over rayon; if any of these types loses
    /// Send or Sync the build breaks here first.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::DerivedSeries>();
        require_sync::<domain::DerivedSeries>();
        require_send::<domain::Fundamentals>();
        require_sync::<domain::Fundamentals>();

        // Indicator types
        require_send::<indicators::IndicatorSet>();
        require_sync::<indicators::IndicatorSet>();
        require_send::<indicators::Sma>();
        require_sync::<indicators::Sma>();
        require_send::<indicators::Ema>();
        require_sync::<indicators::Ema>();
        require_send::<indicators::Rsi>();
        require_sync::<indicators::Rsi>();
        require_send::<indicators::Macd>();
        require_sync::<indicators::Macd>();
        require_send::<indicators::RollingVolatility>();
        require_sync::<indicators::RollingVolatility>();

        // Run outputs
        require_send::<AnalysisConfig>();
        require_sync::<AnalysisConfig>();
        require_send::<AnalysisReport>();
        require_sync::<AnalysisReport>();
        require_send::<SummaryReport>();
        require_sync::<SummaryReport>();
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();

        // Providers
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::CsvProvider>();
        require_sync::<data::CsvProvider>();
        require_send::<data::SyntheticProvider>();
        require_sync::<data::SyntheticProvider>();
    }

    /// Indicators and providers are usable as trait objects.
    #[test]
    fn traits_are_object_safe() {
        fn _indicator(ind: &dyn indicators::Indicator, series: &PriceSeries) -> DerivedSeries {
            ind.derive(series)
        }
        fn _provider(p: &dyn data::DataProvider) -> &str {
            p.name()
        }

        let boxed: Vec<Box<dyn indicators::Indicator>> = vec![
            Box::new(indicators::Sma::new(3)),
            Box::new(indicators::Rsi::new(14)),
            Box::new(indicators::DailyReturn),
        ];
        let names: Vec<&str> = boxed.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["sma_3", "rsi_14", "daily_return"]);
    }
}
