//! Volatility indicators.

use serde::Serialize;
use statrs::statistics::Statistics;
use ta_core::traits::Indicator;
use ta_core::{IndicatorError, Series};

use crate::moving_average::{check_positive, rolling_mean};

/// Default Bollinger window.
pub const DEFAULT_BOLLINGER_WINDOW: usize = 20;
/// Default Bollinger band width in standard deviations.
pub const DEFAULT_NUM_STD: f64 = 2.0;

/// Trailing sample standard deviation (n - 1 denominator).
///
/// Same undefined prefix as [`rolling_mean`]. A window of one value has no
/// sample deviation and is undefined.
pub(crate) fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];

    for (i, w) in values.windows(window).enumerate() {
        result[i + window - 1] = w.iter().std_dev();
    }

    result
}

/// Rolling sample standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingStdDev {
    window: usize,
}

impl RollingStdDev {
    /// Create a new rolling standard deviation.
    ///
    /// A window of 1 is accepted but every position is undefined.
    pub fn new(window: usize) -> Result<Self, IndicatorError> {
        check_positive("standard deviation window", window)?;
        Ok(Self { window })
    }

    /// The window length.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Indicator for RollingStdDev {
    type Output = Series;

    fn calculate(&self, series: &Series) -> Series {
        series.with_values(rolling_std(series.values(), self.window))
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerOutput {
    /// Middle band + num_std × standard deviation
    pub upper: Series,
    /// Middle band (SMA)
    pub middle: Series,
    /// Middle band − num_std × standard deviation
    pub lower: Series,
}

/// Bollinger Bands.
///
/// A middle band (SMA) with upper and lower bands at `num_std` rolling
/// sample standard deviations. All three bands inherit the SMA's undefined
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    window: usize,
    num_std: f64,
}

impl BollingerBands {
    /// Create Bollinger Bands with custom parameters.
    ///
    /// `num_std` must be finite and non-negative.
    pub fn with_params(window: usize, num_std: f64) -> Result<Self, IndicatorError> {
        check_positive("Bollinger window", window)?;
        if !num_std.is_finite() || num_std < 0.0 {
            return Err(IndicatorError::InvalidParameter(format!(
                "Bollinger num_std must be a finite non-negative number, got {num_std}"
            )));
        }
        Ok(Self { window, num_std })
    }

    /// The window length.
    pub fn window(&self) -> usize {
        self.window
    }

    /// The band width in standard deviations.
    pub fn num_std(&self) -> f64 {
        self.num_std
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            window: DEFAULT_BOLLINGER_WINDOW,
            num_std: DEFAULT_NUM_STD,
        }
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerOutput;

    fn calculate(&self, series: &Series) -> BollingerOutput {
        let middle = rolling_mean(series.values(), self.window);
        let std_dev = rolling_std(series.values(), self.window);

        let (upper, lower): (Vec<f64>, Vec<f64>) = middle
            .iter()
            .zip(&std_dev)
            .map(|(&mean, &sd)| {
                let width = self.num_std * sd;
                (mean + width, mean - width)
            })
            .unzip();

        BollingerOutput {
            upper: series.with_values(upper),
            middle: series.with_values(middle),
            lower: series.with_values(lower),
        }
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}
