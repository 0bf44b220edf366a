//! Synthetic data provider for offline runs and tests.
//!
//! Produces a simple random walk from a starting price of 100.0 on weekdays
//! only. The walk is seeded from the symbol name, so the same symbol and
//! range always yield the same closes.

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
pub struct SyntheticProvider {
    start_price: f64,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self { start_price: 100.0 }
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let bars = synthetic_walk(symbol, start, end, self.start_price);
        if bars.is_empty() {
            return Err(DataError::Other(format!(
                "no weekdays between {start} and {end} for {symbol}"
            )));
        }
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::Synthetic,
        })
    }
}

/// Weekday random walk with daily returns drawn uniformly from ±3%.
pub fn synthetic_walk(symbol: &str, start: NaiveDate, end: NaiveDate, start_price: f64) -> Vec<RawBar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut bars = Vec::new();
    let mut price = start_price;
    let mut current = start;

    while current <= end {
        if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            current += chrono::Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        price *= 1.0 + daily_return;
        bars.push(RawBar {
            date: current,
            close: Some(price),
        });
        current += chrono::Duration::days(1);
    }

    bars
}
