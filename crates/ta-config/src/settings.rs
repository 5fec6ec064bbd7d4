//! Configuration structures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ta_core::{IndicatorError, TaError};
use ta_indicators::{
    BollingerBands, Ema, Macd, Rsi, Sma, DEFAULT_BOLLINGER_WINDOW, DEFAULT_EMA_SPAN,
    DEFAULT_MACD_SPANS, DEFAULT_NUM_STD, DEFAULT_RSI_WINDOW, DEFAULT_SMA_WINDOW,
};
use ta_report::OutputFormat;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

impl AppConfig {
    /// Check every setting that can be wrong without touching the network
    /// or the filesystem.
    pub fn validate(&self) -> Result<(), TaError> {
        self.indicators.build()?;
        self.report.date_range()?;

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(TaError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        if self.data.timeout_secs == 0 {
            return Err(TaError::Config("data.timeout_secs must be positive".into()));
        }
        if self.data.provider == DataProvider::Csv && self.data.csv_path.is_none() {
            return Err(TaError::Config(
                "data.csv_path is required when data.provider is \"csv\"".into(),
            ));
        }
        if self.report.tail == 0 {
            return Err(TaError::Config("report.tail must be positive".into()));
        }

        Ok(())
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, TaError> {
        toml::to_string_pretty(self).map_err(|e| TaError::Serialization(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "ta".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Where historical closes come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataProvider {
    #[default]
    Yahoo,
    Csv,
}

/// Data source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub provider: DataProvider,
    pub base_url: String,
    pub timeout_secs: u64,
    pub csv_path: Option<String>,
    /// Use split/dividend adjusted closes.
    pub adjusted: bool,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            provider: DataProvider::Yahoo,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 30,
            csv_path: None,
            adjusted: false,
        }
    }
}

/// Indicator parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub sma_window: usize,
    pub ema_span: usize,
    pub rsi_window: usize,
    pub macd: MacdSettings,
    pub bollinger: BollingerSettings,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            sma_window: DEFAULT_SMA_WINDOW,
            ema_span: DEFAULT_EMA_SPAN,
            rsi_window: DEFAULT_RSI_WINDOW,
            macd: MacdSettings::default(),
            bollinger: BollingerSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdSettings {
    pub short_span: usize,
    pub long_span: usize,
    pub signal_span: usize,
}

impl Default for MacdSettings {
    fn default() -> Self {
        let (short_span, long_span, signal_span) = DEFAULT_MACD_SPANS;
        Self {
            short_span,
            long_span,
            signal_span,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerSettings {
    pub window: usize,
    pub num_std: f64,
}

impl Default for BollingerSettings {
    fn default() -> Self {
        Self {
            window: DEFAULT_BOLLINGER_WINDOW,
            num_std: DEFAULT_NUM_STD,
        }
    }
}

/// Validated indicators, ready to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSet {
    pub sma: Sma,
    pub ema: Ema,
    pub macd: Macd,
    pub rsi: Rsi,
    pub bollinger: BollingerBands,
}

impl IndicatorSettings {
    /// Construct every indicator, failing on the first invalid parameter.
    pub fn build(&self) -> Result<IndicatorSet, IndicatorError> {
        Ok(IndicatorSet {
            sma: Sma::new(self.sma_window)?,
            ema: Ema::new(self.ema_span)?,
            macd: Macd::with_spans(
                self.macd.short_span,
                self.macd.long_span,
                self.macd.signal_span,
            )?,
            rsi: Rsi::new(self.rsi_window)?,
            bollinger: BollingerBands::with_params(self.bollinger.window, self.bollinger.num_std)?,
        })
    }
}

/// What to analyze and how to print it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub symbol: String,
    /// Inclusive start date (YYYY-MM-DD).
    pub start: String,
    /// Exclusive end date (YYYY-MM-DD).
    pub end: String,
    /// Trailing rows to print.
    pub tail: usize,
    pub format: OutputFormat,
}

impl ReportSettings {
    /// Parsed `[start, end)` range.
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), TaError> {
        let start = parse_date("report.start", &self.start)?;
        let end = parse_date("report.end", &self.end)?;
        if start >= end {
            return Err(TaError::Config(format!(
                "report.start {} must be before report.end {}",
                start, end
            )));
        }
        Ok((start, end))
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            symbol: "TATAMOTORS.NS".to_string(),
            start: "2023-01-01".to_string(),
            end: "2024-01-01".to_string(),
            tail: 5,
            format: OutputFormat::Text,
        }
    }
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, TaError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| TaError::Config(format!("{} \"{}\": {}", key, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::traits::Indicator;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        config.validate().unwrap();

        let set = config.indicators.build().unwrap();
        assert_eq!(set.sma.window(), 20);
        assert_eq!(set.ema.span(), 20);
        assert_eq!(set.macd.spans(), (12, 26, 9));
        assert_eq!(set.rsi.window(), 14);
        assert_eq!(set.bollinger.window(), 20);
        assert_eq!(set.bollinger.num_std(), 2.0);
        assert_eq!(set.rsi.name(), "RSI");
    }

    #[test]
    fn test_default_date_range() {
        let (start, end) = ReportSettings::default().date_range().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_invalid_indicator_parameter() {
        let mut config = AppConfig::default();
        config.indicators.rsi_window = 0;

        assert!(matches!(
            config.validate(),
            Err(TaError::Indicator(IndicatorError::InvalidParameter(_)))
        ));

        let mut config = AppConfig::default();
        config.indicators.bollinger.num_std = -1.0;
        assert!(config.indicators.build().is_err());
    }

    #[test]
    fn test_invalid_report_settings() {
        let mut config = AppConfig::default();
        config.report.end = config.report.start.clone();
        assert!(matches!(config.validate(), Err(TaError::Config(_))));

        let mut config = AppConfig::default();
        config.report.start = "01/01/2023".into();
        assert!(matches!(config.validate(), Err(TaError::Config(_))));

        let mut config = AppConfig::default();
        config.report.tail = 0;
        assert!(matches!(config.validate(), Err(TaError::Config(_))));
    }

    #[test]
    fn test_csv_provider_needs_a_path() {
        let mut config = AppConfig::default();
        config.data.provider = DataProvider::Csv;
        assert!(matches!(config.validate(), Err(TaError::Config(_))));

        config.data.csv_path = Some("prices.csv".into());
        config.validate().unwrap();
    }

    #[test]
    fn test_logging_format() {
        let mut config = AppConfig::default();
        assert!(!config.logging.is_json());

        config.logging.format = "xml".into();
        assert!(matches!(config.validate(), Err(TaError::Config(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.report.symbol = "AAPL".into();
        config.report.format = OutputFormat::Json;

        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.report.symbol, "AAPL");
        assert_eq!(parsed.report.format, OutputFormat::Json);
        assert_eq!(parsed.indicators.macd.long_span, 26);
    }
}
