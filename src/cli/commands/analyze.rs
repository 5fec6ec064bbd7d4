//! Analyze command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use std::time::Duration;
use ta_config::{AppConfig, DataProvider, DataSettings, IndicatorSet};
use ta_core::traits::{DataSource, Indicator};
use ta_core::Series;
use ta_data::{CsvDataSource, YahooSource};
use ta_report::{OutputFormat, Report, Section};
use tracing::{error, info};

use crate::cli::AnalyzeArgs;

/// Settings for one run, with command-line flags over the config file.
struct Request {
    symbol: String,
    start: NaiveDate,
    end: NaiveDate,
    tail: usize,
    format: OutputFormat,
    adjusted: bool,
}

impl Request {
    fn resolve(args: &AnalyzeArgs, config: &AppConfig) -> Result<Self> {
        let (start, end) = match (args.start, args.end) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => {
                let (default_start, default_end) = config.report.date_range()?;
                (start.unwrap_or(default_start), end.unwrap_or(default_end))
            }
        };

        Ok(Self {
            symbol: args
                .symbol
                .clone()
                .unwrap_or_else(|| config.report.symbol.clone()),
            start,
            end,
            tail: args.tail.unwrap_or(config.report.tail),
            format: args.output.map(Into::into).unwrap_or(config.report.format),
            adjusted: args.adjusted || config.data.adjusted,
        })
    }
}

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let indicators = config
        .indicators
        .build()
        .context("Invalid indicator settings")?;
    let request = Request::resolve(&args, config)?;

    let source = create_source(args.data.as_deref(), &config.data, request.adjusted)?;
    info!(
        symbol = %request.symbol,
        start = %request.start,
        end = %request.end,
        source = source.name(),
        "Fetching closes"
    );

    // Without a series there is nothing to compute
    let closes = match source
        .fetch_closes(&request.symbol, request.start, request.end)
        .await
    {
        Ok(closes) => closes,
        Err(e) => {
            error!(symbol = %request.symbol, error = %e, "No data available");
            return Err(e).with_context(|| {
                format!(
                    "No data available for {} from {} to {}",
                    request.symbol, request.start, request.end
                )
            });
        }
    };
    info!(
        observations = closes.len(),
        defined = closes.defined_count(),
        "Loaded closes"
    );

    let title = format!("{} {} to {}", request.symbol, request.start, request.end);
    let report = build_report(&title, &closes, &indicators)?;

    println!("{}", report.render(request.format, request.tail)?);

    if let Some(save_path) = &args.save {
        report.save(save_path, request.format, request.tail)?;
    }

    Ok(())
}

fn create_source(
    data: Option<&Path>,
    settings: &DataSettings,
    adjusted: bool,
) -> Result<Box<dyn DataSource>> {
    // An explicit data file wins over the configured provider
    let csv_path = match (data, settings.provider) {
        (Some(path), _) => Some(path.to_string_lossy().into_owned()),
        (None, DataProvider::Csv) => settings.csv_path.clone(),
        (None, DataProvider::Yahoo) => None,
    };

    match csv_path {
        Some(path) => {
            let source = CsvDataSource::new(&path)
                .with_context(|| format!("Data file '{}' does not exist", path))?;
            Ok(Box::new(source.with_adjusted(adjusted)))
        }
        None if settings.provider == DataProvider::Csv => {
            anyhow::bail!("data.csv_path is required when data.provider is \"csv\"")
        }
        None => {
            let source = YahooSource::new(
                settings.base_url.as_str(),
                Duration::from_secs(settings.timeout_secs),
            )?;
            Ok(Box::new(source.with_adjusted(adjusted)))
        }
    }
}

/// Run every indicator over `closes` and collect the results.
fn build_report(title: &str, closes: &Series, indicators: &IndicatorSet) -> Result<Report> {
    let IndicatorSet {
        sma,
        ema,
        macd,
        rsi,
        bollinger,
    } = indicators;

    let (short, long, signal) = macd.spans();
    let macd_output = macd.calculate(closes);
    let bands = bollinger.calculate(closes);

    let report = Report::new(title)
        .with_section(Section::new(
            "Close",
            vec![("close".to_string(), closes.clone())],
        )?)
        .with_section(Section::new(
            "Moving averages",
            vec![
                (format!("SMA({})", sma.window()), sma.calculate(closes)),
                (format!("EMA({})", ema.span()), ema.calculate(closes)),
            ],
        )?)
        .with_section(Section::new(
            format!("MACD({}, {}, {})", short, long, signal),
            vec![
                ("macd".to_string(), macd_output.macd),
                ("signal".to_string(), macd_output.signal),
                ("histogram".to_string(), macd_output.histogram),
            ],
        )?)
        .with_section(Section::new(
            format!("RSI({})", rsi.window()),
            vec![("rsi".to_string(), rsi.calculate(closes))],
        )?)
        .with_section(Section::new(
            format!("Bollinger Bands({}, {})", bollinger.window(), bollinger.num_std()),
            vec![
                ("upper".to_string(), bands.upper),
                ("middle".to_string(), bands.middle),
                ("lower".to_string(), bands.lower),
            ],
        )?);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::DataError;

    fn closes() -> Series {
        Series::from_values((0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect())
    }

    #[test]
    fn test_report_has_every_indicator() {
        let indicators = AppConfig::default().indicators.build().unwrap();
        let report = build_report("TEST", &closes(), &indicators).unwrap();

        let names: Vec<&str> = report.sections().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "Close",
                "Moving averages",
                "MACD(12, 26, 9)",
                "RSI(14)",
                "Bollinger Bands(20, 2)"
            ]
        );
        assert_eq!(
            report.sections()[4].column_names(),
            vec!["upper", "middle", "lower"]
        );
    }

    #[test]
    fn test_report_renders_the_tail() {
        let indicators = AppConfig::default().indicators.build().unwrap();
        let report = build_report("TEST", &closes(), &indicators).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&report.to_json(3).unwrap()).unwrap();
        for section in json["sections"].as_array().unwrap() {
            assert_eq!(section["rows"].as_array().unwrap().len(), 3);
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = AppConfig::default();
        let args = AnalyzeArgs {
            symbol: Some("AAPL".into()),
            start: NaiveDate::from_ymd_opt(2022, 6, 1),
            tail: Some(10),
            output: Some(crate::cli::OutputArg::Json),
            ..Default::default()
        };

        let request = Request::resolve(&args, &config).unwrap();
        assert_eq!(request.symbol, "AAPL");
        assert_eq!(request.start, NaiveDate::from_ymd_opt(2022, 6, 1).unwrap());
        assert_eq!(request.end, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(request.tail, 10);
        assert_eq!(request.format, OutputFormat::Json);
        assert!(!request.adjusted);
    }

    #[test]
    fn test_config_defaults() {
        let request = Request::resolve(&AnalyzeArgs::default(), &AppConfig::default()).unwrap();

        assert_eq!(request.symbol, "TATAMOTORS.NS");
        assert_eq!(request.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(request.tail, 5);
        assert_eq!(request.format, OutputFormat::Text);
    }

    #[test]
    fn test_missing_data_file_is_a_data_error() {
        let err = create_source(
            Some(Path::new("/nonexistent/prices.csv")),
            &DataSettings::default(),
            false,
        )
        .err()
        .unwrap();

        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::NoDataAvailable)
        ));
    }

    #[test]
    fn test_default_source_is_yahoo() {
        let source = create_source(None, &DataSettings::default(), false).unwrap();
        assert_eq!(source.name(), "yahoo");
    }
}
