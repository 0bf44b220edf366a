//! Analysis pipeline: one instrument, one optional benchmark, one report.
//!
//! A run is atomic. It returns the complete set of aligned derived series plus
//! the summary, or a single error before anything is produced.

use crate::config::{AnalysisConfig, HistoryPolicy};
use crate::domain::{DerivedSeries, Fundamentals, PriceSeries};
use crate::error::AnalysisError;
use crate::indicators::{
    CumulativeReturn, DailyReturn, Ema, Indicator, IndicatorSet, Macd, RollingVolatility, Rsi,
    Sma,
};
use crate::risk::{drawdown_series, SummaryReport};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Everything a run produces for one instrument.
///
/// Serializes to JSON with undefined series entries as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub benchmark: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bar_count: usize,
    /// BLAKE3 hash of the instrument's dates and closes.
    pub data_hash: String,
    /// Input closes, aligned with `indicators.dates()`.
    pub closes: Vec<f64>,
    pub indicators: IndicatorSet,
    pub summary: SummaryReport,
    pub fundamentals: Option<Fundamentals>,
}

impl AnalysisReport {
    /// Attach a fundamentals record; an all-empty record is dropped.
    pub fn with_fundamentals(mut self, fundamentals: Option<Fundamentals>) -> Self {
        self.fundamentals = fundamentals.filter(|f| !f.is_empty());
        self
    }
}

/// Run every indicator engine and the risk summary.
pub fn analyze(
    instrument: &PriceSeries,
    benchmark: Option<&PriceSeries>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    config.validate()?;

    let required = config.required_history();
    if config.history_policy == HistoryPolicy::Reject && instrument.len() < required {
        return Err(AnalysisError::InsufficientHistory {
            symbol: instrument.symbol().to_string(),
            required,
            actual: instrument.len(),
        });
    }

    info!(
        symbol = instrument.symbol(),
        bars = instrument.len(),
        benchmark = benchmark.map(|b| b.symbol()),
        "analyzing"
    );

    let indicators = compute_indicators(instrument, config);
    let summary = SummaryReport::compute(instrument, &indicators, benchmark, config)?;

    debug!(
        symbol = instrument.symbol(),
        series = indicators.len(),
        sharpe = ?summary.sharpe_ratio,
        "analysis complete"
    );

    Ok(AnalysisReport {
        symbol: instrument.symbol().to_string(),
        benchmark: benchmark.map(|b| b.symbol().to_string()),
        start_date: instrument.first().date,
        end_date: instrument.last().date,
        bar_count: instrument.len(),
        data_hash: instrument.content_hash(),
        closes: instrument.closes(),
        indicators,
        summary,
        fundamentals: None,
    })
}

/// Analyze several instruments against the same benchmark in parallel.
///
/// Results are returned in input order; one failing instrument does not
/// affect the others.
pub fn analyze_many(
    instruments: &[PriceSeries],
    benchmark: Option<&PriceSeries>,
    config: &AnalysisConfig,
) -> Vec<Result<AnalysisReport, AnalysisError>> {
    instruments
        .par_iter()
        .map(|series| analyze(series, benchmark, config))
        .collect()
}

/// Compute every derived series for one instrument.
///
/// Order: daily_return, sma_*, ema_fast, ema_slow, macd, signal_line,
/// macd_histogram, rsi, volatility, cumulative_return, drawdown.
pub fn compute_indicators(series: &PriceSeries, config: &AnalysisConfig) -> IndicatorSet {
    let mut set = IndicatorSet::new(series.dates());

    set.insert(DailyReturn.derive(series));

    for &window in &config.sma_windows {
        let sma = Sma::new(window);
        debug!(indicator = sma.name(), "computing");
        set.insert(sma.derive(series));
    }

    let ema_fast = Ema::new(config.ema_fast).derive(series);
    let ema_slow = Ema::new(config.ema_slow).derive(series);
    let macd = Macd::new(config.ema_fast, config.ema_slow, config.signal_span)
        .from_emas(&ema_fast.values, &ema_slow.values);
    set.insert(ema_fast);
    set.insert(ema_slow);
    for s in macd.into_derived() {
        set.insert(s);
    }

    set.insert(Rsi::new(config.rsi_period).derive(series));
    set.insert(RollingVolatility::new(config.volatility_window, config.trading_days).derive(series));

    let cumulative = CumulativeReturn.derive(series);
    let drawdown = DerivedSeries::new("drawdown", drawdown_series(&cumulative.values));
    set.insert(cumulative);
    set.insert(drawdown);

    set
}
