//! Technical indicators over time-indexed price series.
//!
//! This crate provides the indicator engine:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (rolling standard deviation, Bollinger Bands)
//!
//! Every indicator is a pure transform. Outputs share the input's index and
//! mark positions without enough history as undefined (see [`Series::get`]).
//! Numeric edge cases never fail; only invalid parameters (a zero window or
//! span) are errors, reported when the indicator is constructed.
//!
//! ```
//! use ta_core::Series;
//!
//! let closes = Series::from_values(vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
//! let sma = ta_indicators::sma(&closes, 3).unwrap();
//!
//! assert_eq!(sma.get(1), None);
//! assert_eq!(sma.get(2), Some(11.0));
//! ```

pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi, DEFAULT_MACD_SPANS, DEFAULT_RSI_WINDOW};
pub use moving_average::{Ema, Sma, DEFAULT_EMA_SPAN, DEFAULT_SMA_WINDOW};
pub use volatility::{
    BollingerBands, BollingerOutput, RollingStdDev, DEFAULT_BOLLINGER_WINDOW, DEFAULT_NUM_STD,
};

use ta_core::traits::Indicator;
use ta_core::{IndicatorError, Series};

/// Simple moving average over `window` periods.
pub fn sma(series: &Series, window: usize) -> Result<Series, IndicatorError> {
    Ok(Sma::new(window)?.calculate(series))
}

/// Exponential moving average with smoothing `2 / (span + 1)`.
pub fn ema(series: &Series, span: usize) -> Result<Series, IndicatorError> {
    Ok(Ema::new(span)?.calculate(series))
}

/// Rolling sample standard deviation over `window` periods.
pub fn rolling_std(series: &Series, window: usize) -> Result<Series, IndicatorError> {
    Ok(RollingStdDev::new(window)?.calculate(series))
}

/// MACD line, signal line and histogram.
pub fn macd(
    series: &Series,
    short_span: usize,
    long_span: usize,
    signal_span: usize,
) -> Result<MacdOutput, IndicatorError> {
    Ok(Macd::with_spans(short_span, long_span, signal_span)?.calculate(series))
}

/// Relative strength index over `window` changes.
pub fn rsi(series: &Series, window: usize) -> Result<Series, IndicatorError> {
    Ok(Rsi::new(window)?.calculate(series))
}

/// Bollinger Bands at `num_std` standard deviations around a `window` SMA.
pub fn bollinger_bands(
    series: &Series,
    window: usize,
    num_std: f64,
) -> Result<BollingerOutput, IndicatorError> {
    Ok(BollingerBands::with_params(window, num_std)?.calculate(series))
}
