//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, BollingerSettings, DataProvider, DataSettings, IndicatorSet,
    IndicatorSettings, LoggingConfig, MacdSettings, ReportSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment variable prefix, e.g. `TA__INDICATORS__RSI_WINDOW=10`.
pub const ENV_PREFIX: &str = "TA";

/// Load configuration from file and environment.
///
/// A missing file leaves the built-in defaults in place.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(File::from(path).required(false), environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn build<F>(file: F, env: Environment) -> Result<AppConfig, ConfigError>
where
    F: config::Source + Send + Sync + 'static,
{
    let config = Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use ta_report::OutputFormat;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/ta.toml")).unwrap();

        assert_eq!(config.report.symbol, "TATAMOTORS.NS");
        assert_eq!(config.indicators.rsi_window, 14);
        config.validate().unwrap();
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = build(File::from(path.as_path()).required(true), env(&[])).unwrap();

        config.validate().unwrap();
        assert_eq!(config.data.provider, DataProvider::Yahoo);
        assert_eq!(config.indicators.macd.signal_span, 9);
        assert_eq!(config.report.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let toml = r#"
            [indicators]
            sma_window = 50

            [indicators.bollinger]
            num_std = 2.5

            [report]
            symbol = "AAPL"
            format = "json"
        "#;
        let config = build(File::from_str(toml, FileFormat::Toml), env(&[])).unwrap();

        assert_eq!(config.indicators.sma_window, 50);
        assert_eq!(config.indicators.ema_span, 20);
        assert_eq!(config.indicators.bollinger.window, 20);
        assert_eq!(config.indicators.bollinger.num_std, 2.5);
        assert_eq!(config.report.symbol, "AAPL");
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.tail, 5);
    }

    #[test]
    fn test_environment_overrides_file() {
        let toml = r#"
            [indicators]
            rsi_window = 21

            [data]
            provider = "csv"
            csv_path = "data/prices.csv"
        "#;
        let config = build(
            File::from_str(toml, FileFormat::Toml),
            env(&[
                ("TA__INDICATORS__RSI_WINDOW", "10"),
                ("TA__REPORT__TAIL", "3"),
            ]),
        )
        .unwrap();

        assert_eq!(config.indicators.rsi_window, 10);
        assert_eq!(config.report.tail, 3);
        assert_eq!(config.data.provider, DataProvider::Csv);
        assert_eq!(config.data.csv_path.as_deref(), Some("data/prices.csv"));
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let toml = r#"
            [indicators]
            sma_window = "twenty"
        "#;
        assert!(build(File::from_str(toml, FileFormat::Toml), env(&[])).is_err());
    }
}
