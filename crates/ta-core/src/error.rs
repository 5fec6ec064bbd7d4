//! Error types for the indicator workspace.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum TaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Data source errors.
///
/// Any of these means the caller has no series to compute on.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Invalid date range: start {start} is not before end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl DataError {
    /// Whether the error means the provider had nothing to return, as opposed
    /// to a transport or parsing failure.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            DataError::NoDataAvailable | DataError::SymbolNotFound(_)
        )
    }
}

/// Indicator parameter errors.
///
/// Numeric edge cases never produce these; they resolve to values or
/// undefined entries in the output series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Structural errors when building a series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Index has {index} entries but values has {values}")]
    LengthMismatch { index: usize, values: usize },

    #[error("Timestamps must be strictly increasing (position {position})")]
    NotIncreasing { position: usize },

    #[error("Series do not share the same index")]
    IndexMismatch,
}

/// Result type alias for workspace operations.
pub type TaResult<T> = Result<T, TaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_classification() {
        assert!(DataError::NoDataAvailable.is_no_data());
        assert!(DataError::SymbolNotFound("XYZ".into()).is_no_data());
        assert!(!DataError::ConnectionError("timeout".into()).is_no_data());
    }

    #[test]
    fn test_conversion_into_top_level() {
        let err: TaError = DataError::NoDataAvailable.into();
        assert!(matches!(err, TaError::Data(DataError::NoDataAvailable)));
        assert_eq!(
            err.to_string(),
            "Data error: No data available for the requested range"
        );
    }
}
