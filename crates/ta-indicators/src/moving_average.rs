//! Moving average indicators.

use ta_core::traits::Indicator;
use ta_core::{IndicatorError, Series};

/// Default SMA window.
pub const DEFAULT_SMA_WINDOW: usize = 20;
/// Default EMA span.
pub const DEFAULT_EMA_SPAN: usize = 20;

/// Reject zero-length windows and spans.
pub(crate) fn check_positive(param: &str, value: usize) -> Result<(), IndicatorError> {
    if value == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{param} must be greater than 0"
        )));
    }
    Ok(())
}

/// Trailing mean over `window` values, NaN for the first `window - 1`
/// positions and wherever the window holds an undefined value.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    let window_f64 = window as f64;

    for (i, w) in values.windows(window).enumerate() {
        result[i + window - 1] = w.iter().sum::<f64>() / window_f64;
    }

    result
}

/// Recursive exponential smoothing seeded with the first value.
///
/// NaN carries forward through the recursion, so an undefined input leaves
/// every later position undefined.
pub(crate) fn exponential_mean(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    let one_minus_alpha = 1.0 - alpha;

    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return result;
    };

    let mut ema = first;
    result.push(ema);
    for &value in iter {
        ema = alpha * value + one_minus_alpha * ema;
        result.push(ema);
    }

    result
}

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the `window` most recent observations ending at each
/// position. The first `window - 1` positions are undefined; they are never
/// filled with zero or a partial average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    window: usize,
}

impl Sma {
    /// Create a new SMA with the specified window.
    pub fn new(window: usize) -> Result<Self, IndicatorError> {
        check_positive("SMA window", window)?;
        Ok(Self { window })
    }

    /// The window length.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for Sma {
    fn default() -> Self {
        Self {
            window: DEFAULT_SMA_WINDOW,
        }
    }
}

impl Indicator for Sma {
    type Output = Series;

    fn calculate(&self, series: &Series) -> Series {
        series.with_values(rolling_mean(series.values(), self.window))
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// `EMA[0] = x[0]` and `EMA[i] = α·x[i] + (1-α)·EMA[i-1]` with
/// `α = 2 / (span + 1)`. There is no undefined prefix; every value depends on
/// the whole history before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ema {
    span: usize,
    alpha: f64,
}

impl Ema {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Result<Self, IndicatorError> {
        check_positive("EMA span", span)?;
        Ok(Self::from_span(span))
    }

    pub(crate) fn from_span(span: usize) -> Self {
        let alpha = 2.0 / (span as f64 + 1.0);
        Self { span, alpha }
    }

    /// The span.
    pub fn span(&self) -> usize {
        self.span
    }

    /// The smoothing factor `2 / (span + 1)`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub(crate) fn smooth(&self, values: &[f64]) -> Vec<f64> {
        exponential_mean(values, self.alpha)
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self::from_span(DEFAULT_EMA_SPAN)
    }
}

impl Indicator for Ema {
    type Output = Series;

    fn calculate(&self, series: &Series) -> Series {
        series.with_values(self.smooth(series.values()))
    }

    fn lookback(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
