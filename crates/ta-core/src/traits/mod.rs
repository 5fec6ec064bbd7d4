//! Core traits for indicators and data sources.

mod data_source;
mod indicator;

pub use data_source::{check_range, DataSource};
pub use indicator::Indicator;
