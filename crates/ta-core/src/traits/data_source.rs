//! Data source trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::DataError;
use crate::series::Series;

/// Trait for historical closing-price sources.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch daily closing prices.
    ///
    /// # Arguments
    /// * `symbol` - The ticker to fetch
    /// * `start` - First day of the range (inclusive)
    /// * `end` - Last day of the range (exclusive)
    ///
    /// # Returns
    /// A series ordered from oldest to newest. Sessions without a close are
    /// undefined entries. An empty range is `DataError::NoDataAvailable`,
    /// never an empty series.
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}

/// Reject empty or inverted date ranges before doing any I/O.
pub fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), DataError> {
    if start >= end {
        return Err(DataError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        let a = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert!(check_range(a, b).is_ok());
        assert!(matches!(
            check_range(b, a),
            Err(DataError::InvalidRange { .. })
        ));
        assert!(check_range(a, a).is_err());
    }
}
