//! Risk and performance summary: scalar aggregation over a finished run.
//!
//! Every metric is a pure function of the price series and its derived
//! series. Singularities (flat prices, too few returns) produce `None`
//! ("unavailable"), never an error and never an infinity.

use crate::config::AnalysisConfig;
use crate::domain::{align_common, PriceSeries};
use crate::error::AnalysisError;
use crate::indicators::{cumulative_returns, daily_returns, IndicatorSet};
use crate::stats::{mean, sample_std_dev};
use serde::{Deserialize, Serialize};

/// Distance of the last close from one SMA, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaGap {
    pub window: usize,
    pub pct: Option<f64>,
}

/// Flat summary of one instrument's run. `None` marks an unavailable metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub current_price: f64,
    pub week52_high: f64,
    pub week52_low: f64,
    pub total_return_pct: f64,
    pub benchmark_total_return_pct: Option<f64>,
    /// Instrument minus benchmark cumulative return over the common dates, as a fraction.
    pub relative_performance: Option<f64>,
    pub annual_volatility_pct: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown_pct: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub signal_line: Option<f64>,
    pub close_vs_sma: Vec<SmaGap>,
}

impl SummaryReport {
    /// Aggregate the summary from a series, its indicators, and an optional benchmark.
    pub fn compute(
        series: &PriceSeries,
        indicators: &IndicatorSet,
        benchmark: Option<&PriceSeries>,
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        let closes = series.closes();
        let last = closes.len() - 1;
        let current_price = series.last().close;

        let returns = match indicators.get("daily_return") {
            Some(s) => s.values.clone(),
            None => daily_returns(&closes),
        };
        let cumulative = match indicators.get("cumulative_return") {
            Some(s) => s.values.clone(),
            None => cumulative_returns(&returns),
        };

        config.validate()?;
        let (week52_high, week52_low) = trailing_extremes(&closes, config.week52_window);

        let (benchmark_total_return_pct, relative_performance) = match benchmark {
            Some(bench) => {
                let rel = relative_performance(series, bench)?;
                (Some(rel.benchmark_return * 100.0), Some(rel.difference()))
            }
            None => (None, None),
        };

        let close_vs_sma = config
            .sma_windows
            .iter()
            .map(|&window| SmaGap {
                window,
                pct: indicators
                    .value(&format!("sma_{window}"), last)
                    .map(|sma| (current_price / sma - 1.0) * 100.0),
            })
            .collect();

        Ok(Self {
            current_price,
            week52_high,
            week52_low,
            total_return_pct: total_return(&closes) * 100.0,
            benchmark_total_return_pct,
            relative_performance,
            annual_volatility_pct: annual_volatility(&returns, config.trading_days)
                .map(|v| v * 100.0),
            sharpe_ratio: sharpe_ratio(&returns, config.trading_days),
            max_drawdown_pct: max_drawdown(&cumulative) * 100.0,
            rsi: indicators.value(&format!("rsi_{}", config.rsi_period), last),
            macd: indicators.value("macd", last),
            signal_line: indicators.value("signal_line", last),
            close_vs_sma,
        })
    }

    /// Flat `(name, value)` view of every metric, in display order.
    pub fn entries(&self) -> Vec<(String, Option<f64>)> {
        let mut entries = vec![
            ("current_price".to_string(), Some(self.current_price)),
            ("week52_high".to_string(), Some(self.week52_high)),
            ("week52_low".to_string(), Some(self.week52_low)),
            ("total_return_pct".to_string(), Some(self.total_return_pct)),
            (
                "benchmark_total_return_pct".to_string(),
                self.benchmark_total_return_pct,
            ),
            ("relative_performance".to_string(), self.relative_performance),
            ("annual_volatility_pct".to_string(), self.annual_volatility_pct),
            ("sharpe_ratio".to_string(), self.sharpe_ratio),
            ("max_drawdown_pct".to_string(), Some(self.max_drawdown_pct)),
            ("rsi".to_string(), self.rsi),
            ("macd".to_string(), self.macd),
            ("signal_line".to_string(), self.signal_line),
        ];
        for gap in &self.close_vs_sma {
            entries.push((format!("close_vs_sma_{}_pct", gap.window), gap.pct));
        }
        entries
    }

    /// Look up a metric by its flat name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v)
    }
}

/// Cumulative returns of instrument and benchmark over their common dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativePerformance {
    /// Net instrument return over the common range, as a fraction.
    pub instrument_return: f64,
    /// Net benchmark return over the common range, as a fraction.
    pub benchmark_return: f64,
    pub common_dates: usize,
}

impl RelativePerformance {
    pub fn difference(&self) -> f64 {
        self.instrument_return - self.benchmark_return
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Compare instrument and benchmark over the dates both traded.
pub fn relative_performance(
    instrument: &PriceSeries,
    benchmark: &PriceSeries,
) -> Result<RelativePerformance, AnalysisError> {
    let aligned = align_common(instrument, benchmark)?;
    Ok(RelativePerformance {
        instrument_return: total_return(&aligned.instrument.closes()),
        benchmark_return: total_return(&aligned.benchmark.closes()),
        common_dates: aligned.dates.len(),
    })
}

/// Total return as a fraction: last / first - 1.
///
/// 0.0 for fewer than two closes or a non-positive first close.
pub fn total_return(closes: &[f64]) -> f64 {
    match (closes.first(), closes.last()) {
        (Some(&first), Some(&last)) if closes.len() >= 2 && first > 0.0 => last / first - 1.0,
        _ => 0.0,
    }
}

/// Max and min close over the trailing `window` observations.
///
/// The window is clamped to the series length and to at least one observation.
pub fn trailing_extremes(closes: &[f64], window: usize) -> (f64, f64) {
    let start = closes.len().saturating_sub(window.max(1));
    closes[start..]
        .iter()
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), &c| {
            (hi.max(c), lo.min(c))
        })
}

/// Annualized volatility of daily returns as a fraction.
pub fn annual_volatility(daily_returns: &[f64], trading_days: usize) -> Option<f64> {
    sample_std_dev(daily_returns).map(|s| s * (trading_days as f64).sqrt())
}

/// Annualized Sharpe ratio with a zero risk-free rate.
///
/// Sharpe = mean * trading_days / (std * sqrt(trading_days)).
/// `None` when the standard deviation is exactly zero or there are fewer than
/// two returns, the same condition under which annual volatility is zero.
pub fn sharpe_ratio(daily_returns: &[f64], trading_days: usize) -> Option<f64> {
    let m = mean(daily_returns)?;
    let std = sample_std_dev(daily_returns)?;
    if std == 0.0 {
        return None;
    }
    let days = trading_days as f64;
    Some((m * days) / (std * days.sqrt()))
}

/// Running maximum, ignoring NaN entries (which copy the previous maximum).
pub fn running_max(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NAN;
    values
        .iter()
        .map(|&v| {
            if !v.is_nan() && (peak.is_nan() || v > peak) {
                peak = v;
            }
            peak
        })
        .collect()
}

/// Drawdown from the running peak of a cumulative-return series: always <= 0.
pub fn drawdown_series(cumulative: &[f64]) -> Vec<f64> {
    cumulative
        .iter()
        .zip(running_max(cumulative))
        .map(|(&c, peak)| {
            if c.is_nan() || peak.is_nan() || peak <= 0.0 {
                f64::NAN
            } else {
                c / peak - 1.0
            }
        })
        .collect()
}

/// Maximum drawdown as a negative fraction (e.g., -0.15 = 15% drawdown).
///
/// 0.0 for monotonically increasing or empty input.
pub fn max_drawdown(cumulative: &[f64]) -> f64 {
    drawdown_series(cumulative)
        .into_iter()
        .filter(|d| !d.is_nan())
        .fold(0.0_f64, f64::min)
}
