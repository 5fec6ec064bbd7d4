//! Presentation for the `ta` binary.
//!
//! - Logging setup (console plus optional log file)
//! - Text and JSON rendering of the trailing rows of indicator series

pub mod logging;
pub mod report;

pub use logging::setup_logging;
pub use report::{OutputFormat, Report, Section};
