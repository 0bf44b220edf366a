//! Serializable analysis configuration.
//!
//! Every field has a default matching the conventional daily-bar settings, so
//! an empty TOML document is a valid configuration.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when a series is too short for some windowed series to have a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    /// Keep going; windowed values without enough history are undefined.
    #[default]
    MarkUndefined,
    /// Fail the run with `InsufficientHistory`.
    Reject,
}

/// Windows, spans, and policies for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// SMA windows, each produces a `sma_{w}` series.
    pub sma_windows: Vec<usize>,
    /// Fast EMA span for MACD (also exported as `ema_{span}`).
    pub ema_fast: usize,
    /// Slow EMA span for MACD (also exported as `ema_{span}`).
    pub ema_slow: usize,
    /// EMA span of the MACD signal line.
    pub signal_span: usize,
    pub rsi_period: usize,
    pub volatility_window: usize,
    /// Annualization factor for daily sampling.
    pub trading_days: usize,
    /// Trailing observation count for the 52-week high/low.
    pub week52_window: usize,
    pub history_policy: HistoryPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_windows: vec![20, 50, 200],
            ema_fast: 12,
            ema_slow: 26,
            signal_span: 9,
            rsi_period: 14,
            volatility_window: 20,
            trading_days: 252,
            week52_window: 252,
            history_policy: HistoryPolicy::MarkUndefined,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> Result<Self, AnalysisError> {
        let config: Self =
            toml::from_str(s).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, AnalysisError> {
        toml::to_string_pretty(self).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let invalid = |msg: String| Err(AnalysisError::InvalidConfig(msg));

        if self.sma_windows.iter().any(|&w| w == 0) {
            return invalid("sma_windows must all be >= 1".into());
        }
        for (name, value) in [
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
            ("signal_span", self.signal_span),
            ("rsi_period", self.rsi_period),
            ("trading_days", self.trading_days),
            ("week52_window", self.week52_window),
        ] {
            if value == 0 {
                return invalid(format!("{name} must be >= 1"));
            }
        }
        if self.ema_fast >= self.ema_slow {
            return invalid(format!(
                "ema_fast ({}) must be shorter than ema_slow ({})",
                self.ema_fast, self.ema_slow
            ));
        }
        if self.volatility_window < 2 {
            return invalid("volatility_window must be >= 2".into());
        }
        Ok(())
    }

    /// Observations needed for every windowed series to have a value.
    ///
    /// SMA(w) is first defined at index w-1. RSI and rolling volatility work
    /// on price changes, so they are first defined at index `period`.
    pub fn required_history(&self) -> usize {
        self.sma_windows
            .iter()
            .copied()
            .chain([self.rsi_period + 1, self.volatility_window + 1])
            .max()
            .unwrap_or(1)
    }
}
