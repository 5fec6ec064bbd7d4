//! Indicator trait definitions.

use crate::series::Series;

/// Trait for technical indicators.
///
/// An indicator is an immutable set of validated parameters. Calculating it
/// is a pure transform: the input is never modified and every output series
/// has exactly the input's index, with undefined entries where there was not
/// enough history.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator (a series, or a struct of series).
    type Output;

    /// Calculate indicator values for the given series.
    fn calculate(&self, series: &Series) -> Self::Output;

    /// Number of leading undefined positions for fully defined input.
    fn lookback(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RollingSum {
        window: usize,
    }

    impl Indicator for RollingSum {
        type Output = Series;

        fn calculate(&self, series: &Series) -> Series {
            let mut out = vec![f64::NAN; series.len()];
            for (i, w) in series.values().windows(self.window).enumerate() {
                out[i + self.window - 1] = w.iter().sum();
            }
            series.with_values(out)
        }

        fn lookback(&self) -> usize {
            self.window - 1
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_indicator_calculate() {
        let indicator = RollingSum { window: 3 };
        let series = Series::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = indicator.calculate(&series);

        assert_eq!(result.len(), series.len());
        assert_eq!(result.index(), series.index());
        assert_eq!(result.leading_undefined(), indicator.lookback());
        assert!((result.get(2).unwrap() - 6.0).abs() < 0.001); // 1+2+3
        assert!((result.get(4).unwrap() - 12.0).abs() < 0.001); // 3+4+5
    }
}
