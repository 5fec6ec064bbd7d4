//! Time-indexed numeric series.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SeriesError;

/// An ordered sequence of `(timestamp, value)` observations.
///
/// Timestamps are Unix milliseconds (UTC) and strictly increasing. A value
/// that could not be observed or computed is *undefined*; it is stored as
/// NaN and reported as `None` by [`Series::get`]. Infinities are ordinary
/// values.
///
/// A series is immutable once built. Indicators return new series that share
/// the input's index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    index: Vec<i64>,
    values: Vec<f64>,
}

impl Series {
    /// Build a series, validating the index.
    pub fn new(index: Vec<i64>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if index.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                index: index.len(),
                values: values.len(),
            });
        }
        if let Some(position) = index.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SeriesError::NotIncreasing {
                position: position + 1,
            });
        }
        Ok(Self { index, values })
    }

    /// Build a series indexed by position (0, 1, 2, ...).
    pub fn from_values(values: Vec<f64>) -> Self {
        let index = (0..values.len() as i64).collect();
        Self { index, values }
    }

    /// A series on the same index with new values.
    ///
    /// # Panics
    /// Panics if `values` does not have one entry per timestamp.
    pub fn with_values(&self, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            self.index.len(),
            "values must align with the series index"
        );
        Self {
            index: self.index.clone(),
            values,
        }
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Timestamps in milliseconds.
    pub fn index(&self) -> &[i64] {
        &self.index
    }

    /// Raw values, NaN where undefined.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The value at `i`, or `None` if out of range or undefined.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied().filter(|v| !v.is_nan())
    }

    /// The timestamp at `i`.
    pub fn timestamp(&self, i: usize) -> Option<i64> {
        self.index.get(i).copied()
    }

    /// The timestamp at `i` as a UTC datetime.
    pub fn datetime(&self, i: usize) -> Option<DateTime<Utc>> {
        self.timestamp(i).and_then(DateTime::from_timestamp_millis)
    }

    /// Iterate `(timestamp, value)` pairs with undefined values as `None`.
    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = (i64, Option<f64>)> + ExactSizeIterator + '_ {
        self.index
            .iter()
            .zip(&self.values)
            .map(|(&ts, &v)| (ts, if v.is_nan() { None } else { Some(v) }))
    }

    /// The last `n` observations (or all of them if shorter).
    pub fn tail(&self, n: usize) -> Series {
        let start = self.len().saturating_sub(n);
        Self {
            index: self.index[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// Number of defined values.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Number of undefined values before the first defined one.
    pub fn leading_undefined(&self) -> usize {
        self.values.iter().take_while(|v| v.is_nan()).count()
    }

    /// The most recent defined observation.
    pub fn last_defined(&self) -> Option<(i64, f64)> {
        self.iter()
            .rev()
            .find_map(|(ts, v)| v.map(|value| (ts, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        let err = Series::new(vec![1, 2, 3], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SeriesError::LengthMismatch { index: 3, values: 2 });
    }

    #[test]
    fn test_new_validates_order() {
        let err = Series::new(vec![1, 3, 3], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, SeriesError::NotIncreasing { position: 2 });

        let err = Series::new(vec![5, 4], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SeriesError::NotIncreasing { position: 1 });
    }

    #[test]
    fn test_undefined_values() {
        let series = Series::from_values(vec![f64::NAN, 1.0, f64::INFINITY, f64::NAN]);

        assert_eq!(series.get(0), None);
        assert_eq!(series.get(1), Some(1.0));
        assert_eq!(series.get(2), Some(f64::INFINITY));
        assert_eq!(series.get(9), None);
        assert_eq!(series.defined_count(), 2);
        assert_eq!(series.leading_undefined(), 1);
        assert_eq!(series.last_defined(), Some((2, f64::INFINITY)));
    }

    #[test]
    fn test_tail_keeps_index() {
        let series = Series::new(vec![10, 20, 30, 40], vec![1.0, 2.0, 3.0, 4.0]).unwrap();

        let tail = series.tail(2);
        assert_eq!(tail.index(), &[30, 40]);
        assert_eq!(tail.values(), &[3.0, 4.0]);

        assert_eq!(series.tail(10).len(), 4);
        assert!(series.tail(0).is_empty());
    }

    #[test]
    fn test_datetime() {
        // 2024-01-15 00:00:00 UTC
        let series = Series::new(vec![1_705_276_800_000], vec![1.0]).unwrap();
        let dt = series.datetime(0).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    #[should_panic(expected = "values must align")]
    fn test_with_values_length_mismatch() {
        Series::from_values(vec![1.0, 2.0]).with_values(vec![1.0]);
    }

    #[test]
    fn test_json_encodes_undefined_as_null() {
        let series = Series::from_values(vec![1.5, f64::NAN]);
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"{"index":[0,1],"values":[1.5,null]}"#);
    }
}
