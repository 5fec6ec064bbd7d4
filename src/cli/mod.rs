//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ta_report::OutputFormat;

#[derive(Parser)]
#[command(name = "ta")]
#[command(author, version, about = "Technical indicators over historical price series")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    Text,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch closes and print indicator values
    Analyze(AnalyzeArgs),
    /// List indicators with their configured parameters
    Indicators,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args, Default)]
pub struct AnalyzeArgs {
    /// Ticker symbol
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date, exclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Data file (CSV) instead of the configured provider
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Number of trailing rows to print
    #[arg(short, long)]
    pub tail: Option<usize>,

    /// Output format
    #[arg(short, long)]
    pub output: Option<OutputArg>,

    /// Save the rendered report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Use split/dividend adjusted closes
    #[arg(long)]
    pub adjusted: bool,
}
