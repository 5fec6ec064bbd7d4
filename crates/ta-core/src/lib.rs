//! Core types and traits for technical analysis.
//!
//! This crate provides the foundational building blocks including:
//! - The time-indexed [`Series`] every indicator consumes and produces
//! - The error taxonomy shared by indicators, data sources and configuration
//! - Core traits for indicators and historical data sources

pub mod error;
pub mod series;
pub mod traits;

pub use error::{DataError, IndicatorError, SeriesError, TaError, TaResult};
pub use series::Series;
pub use traits::*;
