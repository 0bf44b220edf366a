//! CSV file provider.
//!
//! Reads `<dir>/<SYMBOL>.csv` with a `date` column (YYYY-MM-DD) and a close
//! column. Header matching is case-insensitive; `close` wins over
//! `adj close` / `adj_close` when both exist. Other columns are ignored.
//!
//! An optional `<dir>/<SYMBOL>.fundamentals.json` sidecar supplies
//! fundamentals.

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use crate::domain::Fundamentals;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    fn fundamentals_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.fundamentals.json"))
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::MissingFile {
                symbol: symbol.to_string(),
                path: path.display().to_string(),
            });
        }

        let bars: Vec<RawBar> = read_bars(&path)?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        debug!(symbol, bars = bars.len(), path = %path.display(), "loaded CSV");

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }

    fn fundamentals(&self, symbol: &str) -> Option<Fundamentals> {
        let path = self.fundamentals_path(symbol);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(f) => Some(f),
            Err(e) => {
                warn!(symbol, path = %path.display(), error = %e, "ignoring unreadable fundamentals");
                None
            }
        }
    }
}

/// Parse every row of a date/close CSV file.
///
/// A row whose close is empty or not a number becomes `close: None` so the
/// validation boundary can report it with its index; a bad date is a CSV error.
pub fn read_bars(path: &Path) -> Result<Vec<RawBar>, DataError> {
    let csv_err = |message: String| DataError::Csv {
        path: path.display().to_string(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_err(e.to_string()))?;

    let headers = reader.headers().map_err(|e| csv_err(e.to_string()))?.clone();
    let (date_col, close_col) = locate_columns(&headers).map_err(csv_err)?;

    let mut bars = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_err(e.to_string()))?;
        let date_str = record.get(date_col).unwrap_or("");
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| csv_err(format!("row {}: bad date '{date_str}': {e}", line + 1)))?;
        let close = record
            .get(close_col)
            .and_then(|s| s.parse::<f64>().ok());
        bars.push(RawBar { date, close });
    }

    Ok(bars)
}

fn locate_columns(headers: &csv::StringRecord) -> Result<(usize, usize), String> {
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    };

    let date = find(&["date"]).ok_or("missing 'date' column")?;
    let close = find(&["close"])
        .or_else(|| find(&["adj close", "adj_close"]))
        .ok_or("missing 'close' column")?;
    Ok((date, close))
}
