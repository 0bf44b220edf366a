//! Data provider trait, raw provider output, and the validation boundary.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV
//! files, synthetic data) so the CLI can swap implementations and tests can
//! run offline. Providers return `RawBar`s; nothing reaches the engine until
//! [`into_price_series`] has enforced the strict `Bar` contract.

use crate::domain::{Bar, Fundamentals, PriceSeries};
use crate::error::AnalysisError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daily close from a provider, before validation. `None` means the
/// provider reported the date without a usable close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no data file for '{symbol}' at {path}")]
    MissingFile { symbol: String, path: String },

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error(transparent)]
    Invalid(#[from] AnalysisError),

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
}

/// Trait for data providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily closes for a symbol over an inclusive date range.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;

    /// Best-effort fundamentals. Providers without them return `None`.
    fn fundamentals(&self, _symbol: &str) -> Option<Fundamentals> {
        None
    }

    /// Fetch and validate in one step.
    fn load_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let fetched = self.fetch(symbol, start, end)?;
        Ok(into_price_series(&fetched.symbol, fetched.bars)?)
    }
}

/// Enforce the `Bar` contract on provider output.
///
/// Fails fast on the first missing, non-finite or non-positive close, on
/// dates that are not strictly increasing, and on empty input.
pub fn into_price_series(symbol: &str, raw: Vec<RawBar>) -> Result<PriceSeries, AnalysisError> {
    let mut bars = Vec::with_capacity(raw.len());
    for (index, bar) in raw.into_iter().enumerate() {
        match bar.close {
            Some(close) => bars.push(Bar::new(bar.date, close)),
            None => {
                return Err(AnalysisError::InvalidPrice {
                    symbol: symbol.to_string(),
                    index,
                    date: bar.date,
                    value: None,
                })
            }
        }
    }
    PriceSeries::new(symbol, bars)
}
