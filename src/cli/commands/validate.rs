//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use ta_config::{AppConfig, DataProvider};

pub async fn run(config: &AppConfig, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, using built-in defaults");
    }

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let (start, end) = config.report.date_range()?;

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Log level: {}", config.logging.level);
    match config.data.provider {
        DataProvider::Yahoo => println!("Data: yahoo ({})", config.data.base_url),
        DataProvider::Csv => println!(
            "Data: csv ({})",
            config.data.csv_path.as_deref().unwrap_or_default()
        ),
    }
    println!("Adjusted closes: {}", config.data.adjusted);
    println!("Symbol: {}", config.report.symbol);
    println!("Range: {} to {} (end exclusive)", start, end);
    println!("Tail: {} rows as {:?}", config.report.tail, config.report.format);

    Ok(())
}
