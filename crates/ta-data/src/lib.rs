//! Historical price sources.
//!
//! - [`YahooSource`]: daily closes from the Yahoo Finance chart API
//! - [`CsvDataSource`]: daily closes from a local CSV export

mod csv_source;
mod yahoo;

pub use csv_source::CsvDataSource;
pub use yahoo::{YahooSource, DEFAULT_BASE_URL};

use chrono::{NaiveDate, NaiveTime};
use ta_core::error::DataError;
use ta_core::Series;
use tracing::debug;

/// Load the closes in `[start, end)` from a CSV file.
pub async fn load_csv(path: &str, start: NaiveDate, end: NaiveDate) -> Result<Series, DataError> {
    use ta_core::traits::DataSource;

    let source = CsvDataSource::new(path)?;
    source.fetch_closes("", start, end).await
}

/// Midnight UTC of `date` as Unix milliseconds.
pub(crate) fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Turn raw `(timestamp_ms, close)` rows into a series.
///
/// Rows outside `[start_ms, end_ms)` are dropped, the rest are ordered by
/// timestamp and a repeated timestamp keeps its last row. No rows left means
/// there is no data for the range.
pub(crate) fn rows_to_series(
    mut rows: Vec<(i64, f64)>,
    start_ms: Option<i64>,
    end_ms: Option<i64>,
) -> Result<Series, DataError> {
    let total = rows.len();
    rows.retain(|&(ts, _)| {
        start_ms.map_or(true, |start| ts >= start) && end_ms.map_or(true, |end| ts < end)
    });
    rows.sort_by_key(|&(ts, _)| ts);

    let mut index: Vec<i64> = Vec::with_capacity(rows.len());
    let mut values: Vec<f64> = Vec::with_capacity(rows.len());
    for (ts, close) in rows {
        if index.last() == Some(&ts) {
            if let Some(last) = values.last_mut() {
                *last = close;
            }
            continue;
        }
        index.push(ts);
        values.push(close);
    }

    debug!(total, kept = index.len(), "Normalized price rows");

    if index.is_empty() {
        return Err(DataError::NoDataAvailable);
    }

    Series::new(index, values).map_err(|e| DataError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_start_millis() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(day_start_millis(date), 1_705_276_800_000);
    }

    #[test]
    fn test_rows_sorted_and_deduplicated() {
        let rows = vec![(30, 3.0), (10, 1.0), (20, 2.0), (30, 3.5)];
        let series = rows_to_series(rows, None, None).unwrap();

        assert_eq!(series.index(), &[10, 20, 30]);
        assert_eq!(series.values(), &[1.0, 2.0, 3.5]);
    }

    #[test]
    fn test_rows_filtered_to_half_open_range() {
        let rows = vec![(10, 1.0), (20, 2.0), (30, 3.0), (40, 4.0)];
        let series = rows_to_series(rows, Some(20), Some(40)).unwrap();

        assert_eq!(series.index(), &[20, 30]);
    }

    #[test]
    fn test_no_rows_is_no_data() {
        let rows = vec![(10, 1.0)];
        assert!(matches!(
            rows_to_series(rows, Some(20), None),
            Err(DataError::NoDataAvailable)
        ));
        assert!(matches!(
            rows_to_series(vec![], None, None),
            Err(DataError::NoDataAvailable)
        ));
    }
}
