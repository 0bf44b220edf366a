//! Engine error taxonomy.
//!
//! Every error names the symbol it concerns so that a multi-symbol CLI run
//! can report failures per instrument. Division singularities (flat prices,
//! zero average loss) are NOT errors: they are handled locally with explicit
//! undefined/unavailable markers.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("series for '{symbol}' has no observations")]
    EmptySeries { symbol: String },

    #[error("series for '{symbol}' has {actual} observations, {required} required")]
    InsufficientHistory {
        symbol: String,
        required: usize,
        actual: usize,
    },

    #[error("invalid close price for '{symbol}' at index {index} ({date}): {value:?}")]
    InvalidPrice {
        symbol: String,
        index: usize,
        date: NaiveDate,
        value: Option<f64>,
    },

    #[error("dates for '{symbol}' are not strictly increasing at index {index} ({date})")]
    UnorderedDates {
        symbol: String,
        index: usize,
        date: NaiveDate,
    },

    #[error(
        "'{instrument}' and benchmark '{benchmark}' share {common} dates, at least 2 required"
    )]
    MisalignedSeries {
        instrument: String,
        benchmark: String,
        common: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
