//! CSV data source.

use std::path::Path;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use ta_core::error::DataError;
use ta_core::traits::{check_range, DataSource};
use ta_core::Series;
use tracing::{debug, warn};

use crate::{day_start_millis, rows_to_series};

const ADJ_CLOSE_HEADERS: [&str; 3] = ["Adj Close", "adj_close", "adjclose"];

/// CSV record format.
///
/// Other columns (open, high, low, volume) are ignored.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Close", default)]
    close: Option<String>,
    #[serde(rename = "Adj Close", alias = "adj_close", alias = "adjclose", default)]
    adj_close: Option<String>,
}

/// CSV data source for historical closes.
///
/// One file holds one symbol, so the symbol passed to
/// [`DataSource::fetch_closes`] is only used for logging.
pub struct CsvDataSource {
    path: String,
    adjusted: bool,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: &str) -> Result<Self, DataError> {
        if !Path::new(path).exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            path: path.to_string(),
            adjusted: false,
        })
    }

    /// Prefer the `Adj Close` column when a row has one.
    pub fn with_adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = adjusted;
        self
    }

    /// Load every row of the file.
    pub fn load_all(&self) -> Result<Series, DataError> {
        let rows = self.load_rows()?;
        rows_to_series(rows, None, None)
    }

    fn load_rows(&self) -> Result<Vec<(i64, f64)>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        // Files without an adjusted column fall back to raw closes
        let use_adjusted = self.adjusted
            && reader
                .headers()
                .map_err(|e| DataError::ParseError(e.to_string()))?
                .iter()
                .any(|h| ADJ_CLOSE_HEADERS.contains(&h));
        if self.adjusted && !use_adjusted {
            warn!(path = %self.path, "No adjusted close column, using raw closes");
        }

        let mut rows = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let timestamp = parse_timestamp(&record.date)?;
            let raw = if use_adjusted {
                record.adj_close
            } else {
                record.close
            };

            rows.push((timestamp, parse_price(raw.as_deref())?));
        }

        debug!(path = %self.path, rows = rows.len(), "Loaded CSV");
        Ok(rows)
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, DataError> {
        check_range(start, end)?;
        debug!(symbol, path = %self.path, "Reading closes from CSV");

        let rows = self.load_rows()?;
        rows_to_series(rows, Some(day_start_millis(start)), Some(day_start_millis(end)))
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse a close cell. Empty cells and `null`/`NaN` markers are undefined.
fn parse_price(raw: Option<&str>) -> Result<f64, DataError> {
    match raw {
        None | Some("") => Ok(f64::NAN),
        Some(s) if s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("nan") => {
            Ok(f64::NAN)
        }
        Some(s) => s
            .parse::<f64>()
            .map_err(|_| DataError::ParseError(format!("Could not parse close: {}", s))),
    }
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
