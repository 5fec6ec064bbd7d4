//! Yahoo Finance chart API source.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use ta_core::error::DataError;
use ta_core::traits::{check_range, DataSource};
use ta_core::Series;
use tracing::{debug, info, warn};

use crate::{day_start_millis, rows_to_series};

/// Public chart API host.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = concat!("ta/", env!("CARGO_PKG_VERSION"));

/// Chart API response types
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Daily closes from the Yahoo Finance chart API.
///
/// Sessions the provider reports without a close become undefined entries.
#[derive(Debug, Clone)]
pub struct YahooSource {
    client: Client,
    base_url: String,
    adjusted: bool,
}

impl YahooSource {
    /// Create a client against `base_url` with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            adjusted: false,
        })
    }

    /// Use split/dividend adjusted closes instead of raw closes.
    pub fn with_adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = adjusted;
        self
    }

    /// Extract the close column from a decoded chart response.
    fn closes_from_chart(
        &self,
        symbol: &str,
        response: ChartResponse,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Series, DataError> {
        if let Some(error) = response.chart.error {
            let description = error.description.unwrap_or_default();
            return Err(if error.code == "Not Found" {
                DataError::SymbolNotFound(symbol.to_string())
            } else {
                DataError::Provider(format!("{}: {}", error.code, description))
            });
        }

        let result = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or(DataError::NoDataAvailable)?;

        let indicators = result.indicators;
        let closes = if self.adjusted {
            indicators.adjclose.into_iter().next().map(|a| a.adjclose)
        } else {
            indicators.quote.into_iter().next().map(|q| q.close)
        };
        let closes = closes.unwrap_or_default();

        if closes.len() != result.timestamp.len() {
            return Err(DataError::ParseError(format!(
                "{} timestamps but {} closes",
                result.timestamp.len(),
                closes.len()
            )));
        }

        let missing = closes.iter().filter(|c| c.is_none()).count();
        if missing > 0 {
            warn!(symbol, missing, "Sessions without a close");
        }

        let rows = result
            .timestamp
            .iter()
            .zip(closes)
            .map(|(&ts, close)| (ts * 1000, close.unwrap_or(f64::NAN)))
            .collect();

        rows_to_series(rows, Some(start_ms), Some(end_ms))
    }
}

#[async_trait]
impl DataSource for YahooSource {
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, DataError> {
        check_range(start, end)?;

        let start_ms = day_start_millis(start);
        let end_ms = day_start_millis(end);
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let params = [
            ("period1", (start_ms / 1000).to_string()),
            ("period2", (end_ms / 1000).to_string()),
            ("interval", "1d".to_string()),
            ("events", "history".to_string()),
        ];

        debug!(%url, %start, %end, "Requesting chart");

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        // Error payloads come with non-success statuses but still carry a chart body
        let response = match serde_json::from_str::<ChartResponse>(&text) {
            Ok(response) => response,
            Err(_) if status == StatusCode::NOT_FOUND => {
                return Err(DataError::SymbolNotFound(symbol.to_string()));
            }
            Err(_) if !status.is_success() => {
                return Err(DataError::Provider(format!("{}: {}", status, text)));
            }
            Err(e) => return Err(DataError::ParseError(e.to_string())),
        };

        let series = self.closes_from_chart(symbol, response, start_ms, end_ms)?;
        info!(symbol, observations = series.len(), "Fetched closes");
        Ok(series)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
