//! Data providers and the validation boundary into `PriceSeries`.

pub mod csv_file;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use csv_file::{read_bars, CsvProvider};
pub use provider::{into_price_series, DataError, DataProvider, DataSource, FetchResult, RawBar};
pub use synthetic::{synthetic_walk, SyntheticProvider};
pub use yahoo::YahooProvider;
