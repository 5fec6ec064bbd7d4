//! Momentum indicators.

use serde::Serialize;
use ta_core::traits::Indicator;
use ta_core::{IndicatorError, Series};

use crate::moving_average::{check_positive, rolling_mean, Ema};

/// Default RSI window.
pub const DEFAULT_RSI_WINDOW: usize = 14;
/// Default MACD spans (short, long, signal).
pub const DEFAULT_MACD_SPANS: (usize, usize, usize) = (12, 26, 9);

/// Relative Strength Index (RSI).
///
/// Gains and losses are the positive and negative parts of period-over-period
/// changes, averaged with a simple moving average over `window` changes:
///
/// `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`
///
/// The first change is undefined, so the first `window` positions are
/// undefined. A window with losses of zero and some gain saturates at 100; a
/// window with no movement at all is 0/0 and stays undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    window: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common windows are 14 (default) or 9.
    pub fn new(window: usize) -> Result<Self, IndicatorError> {
        check_positive("RSI window", window)?;
        Ok(Self { window })
    }

    /// The window length.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Split changes into zero-filled gains and losses.
    ///
    /// Position 0 has no prior value and is undefined in both.
    fn gains_and_losses(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let mut gains = vec![f64::NAN; values.len()];
        let mut losses = vec![f64::NAN; values.len()];

        for i in 1..values.len() {
            let change = values[i] - values[i - 1];
            if change.is_nan() {
                continue;
            }
            gains[i] = if change > 0.0 { change } else { 0.0 };
            losses[i] = if change < 0.0 { -change } else { 0.0 };
        }

        (gains, losses)
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            window: DEFAULT_RSI_WINDOW,
        }
    }
}

impl Indicator for Rsi {
    type Output = Series;

    fn calculate(&self, series: &Series) -> Series {
        let (gains, losses) = Self::gains_and_losses(series.values());
        let avg_gains = rolling_mean(&gains, self.window);
        let avg_losses = rolling_mean(&losses, self.window);

        // IEEE division gives rs = inf for x/0 (RSI 100) and NaN for 0/0.
        let rsi = avg_gains
            .iter()
            .zip(&avg_losses)
            .map(|(&gain, &loss)| 100.0 - 100.0 / (1.0 + gain / loss))
            .collect();

        series.with_values(rsi)
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdOutput {
    /// MACD line (short EMA - long EMA)
    pub macd: Series,
    /// Signal line (EMA of the MACD line)
    pub signal: Series,
    /// Histogram (MACD - Signal)
    pub histogram: Series,
}

/// MACD indicator.
///
/// The MACD line is the difference of a short and a long EMA of the input;
/// the signal line is an EMA of the MACD line itself. All three outputs are
/// defined from the first position.
///
/// The indicator is only meaningful with `short < long`. This is not
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    short: Ema,
    long: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a MACD with custom spans.
    pub fn with_spans(short: usize, long: usize, signal: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            short: Ema::new(short)?,
            long: Ema::new(long)?,
            signal: Ema::new(signal)?,
        })
    }

    /// The (short, long, signal) spans.
    pub fn spans(&self) -> (usize, usize, usize) {
        (self.short.span(), self.long.span(), self.signal.span())
    }
}

impl Default for Macd {
    fn default() -> Self {
        let (short, long, signal) = DEFAULT_MACD_SPANS;
        Self {
            short: Ema::from_span(short),
            long: Ema::from_span(long),
            signal: Ema::from_span(signal),
        }
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn calculate(&self, series: &Series) -> MacdOutput {
        let short = self.short.smooth(series.values());
        let long = self.long.smooth(series.values());

        let macd: Vec<f64> = short.iter().zip(&long).map(|(s, l)| s - l).collect();
        let signal = self.signal.smooth(&macd);
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        MacdOutput {
            macd: series.with_values(macd),
            signal: series.with_values(signal),
            histogram: series.with_values(histogram),
        }
    }

    fn lookback(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
