//! Technical analysis CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use ta_config::load_config;
use ta_core::DataError;
use ta_report::setup_logging;

/// Exit code when no price data could be obtained.
const NO_DATA_EXIT_CODE: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging comes up before the config is checked so load errors get logged
    let loaded = load_config(&cli.config);
    let defaults = ta_config::LoggingConfig::default();
    let logging = loaded.as_ref().map(|c| &c.logging).unwrap_or(&defaults);

    let level = cli
        .log_level
        .map(|l| l.as_str())
        .unwrap_or(logging.level.as_str());
    let guard = setup_logging(
        level,
        cli.json_logs || logging.is_json(),
        logging.file.as_deref().map(Path::new),
    );

    let config = loaded.with_context(|| {
        format!("Failed to load configuration from {}", cli.config.display())
    })?;

    // Execute command
    let result = match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Indicators => cli::commands::indicators::run(&config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&config, &cli.config).await,
    };

    if let Err(e) = &result {
        if e.downcast_ref::<DataError>().is_some() {
            eprintln!("Error: {:#}", e);
            drop(guard);
            std::process::exit(NO_DATA_EXIT_CODE);
        }
    }

    result
}
