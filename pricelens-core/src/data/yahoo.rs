//! Yahoo Finance data provider.
//!
//! Fetches daily closes from Yahoo's v8 chart API and, best-effort,
//! fundamentals from the quoteSummary API. Retries with exponential backoff
//! on rate limits, server errors and connection failures.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.
//! The CSV provider is the fallback when Yahoo is unavailable.

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use crate::domain::Fundamentals;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

/// quoteSummary response, limited to the modules we request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<SummaryModules>>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryModules {
    #[serde(default)]
    summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatistics>,
    #[serde(default)]
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    market_cap: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    trailing_eps: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
}

/// Yahoo wraps numbers as `{"raw": 1.0, "fmt": "1.00"}`; `{}` means absent.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

fn raw(v: Option<RawValue>) -> Option<f64> {
    v.and_then(|v| v.raw).filter(|x| x.is_finite())
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        })
    }

    /// Build the chart API URL for a symbol and inclusive date range.
    fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = (end + chrono::Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d\
             &includeAdjustedClose=true"
        )
    }

    fn summary_url(symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{symbol}\
             ?modules=summaryDetail,defaultKeyStatistics,assetProfile"
        )
    }

    /// Parse the chart API response into RawBars.
    ///
    /// Adjusted closes are preferred over raw closes. Rows with neither are
    /// non-trading days and are skipped; a repeated date keeps the later row.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<RawBar>, DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut bars: Vec<RawBar> = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let adj_close = adj_closes
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten());
            let close = adj_close.or_else(|| quote.close.get(i).copied().flatten());

            let Some(close) = close else {
                continue;
            };

            match bars.last_mut() {
                Some(prev) if prev.date == date => prev.close = Some(close),
                _ => bars.push(RawBar {
                    date,
                    close: Some(close),
                }),
            }
        }

        if bars.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        Ok(bars)
    }

    fn parse_summary(resp: SummaryResponse) -> Option<Fundamentals> {
        if let Some(err) = resp.quote_summary.error {
            debug!(code = %err.code, description = %err.description, "quoteSummary error");
            return None;
        }
        let modules = resp.quote_summary.result?.into_iter().next()?;

        let (market_cap, trailing_pe) = modules
            .summary_detail
            .map(|d| (raw(d.market_cap), raw(d.trailing_pe)))
            .unwrap_or_default();

        Some(Fundamentals {
            market_cap,
            trailing_pe,
            trailing_eps: modules
                .default_key_statistics
                .and_then(|k| raw(k.trailing_eps)),
            sector: modules.asset_profile.and_then(|p| p.sector),
        })
    }

    /// GET `url`, retrying with exponential backoff on transient failures.
    fn get_with_retry(
        &self,
        symbol: &str,
        url: &str,
    ) -> Result<reqwest::blocking::Response, DataError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                debug!(symbol, attempt, delay_ms = delay.as_millis() as u64, "retrying");
                std::thread::sleep(delay);
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(DataError::SymbolNotFound {
                            symbol: symbol.to_string(),
                        });
                    }

                    if status.is_client_error() {
                        return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
                    }

                    if !status.is_success() {
                        last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    return Ok(resp);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let url = Self::chart_url(symbol, start, end);
        let chart: ChartResponse = self.get_with_retry(symbol, &url)?.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let bars = Self::parse_response(symbol, chart)?;
        debug!(symbol, bars = bars.len(), "fetched from Yahoo");
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::YahooFinance,
        })
    }

    fn fundamentals(&self, symbol: &str) -> Option<Fundamentals> {
        let url = Self::summary_url(symbol);
        let parsed = self
            .get_with_retry(symbol, &url)
            .and_then(|resp| {
                resp.json::<SummaryResponse>()
                    .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))
            });

        match parsed {
            Ok(resp) => Self::parse_summary(resp),
            Err(e) => {
                warn!(symbol, error = %e, "fundamentals unavailable");
                None
            }
        }
    }
}
