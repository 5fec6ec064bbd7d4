//! List indicators command.

use anyhow::{Context, Result};
use ta_config::{AppConfig, IndicatorSet};
use ta_core::traits::Indicator;

pub async fn run(config: &AppConfig) -> Result<()> {
    let indicators = config
        .indicators
        .build()
        .context("Invalid indicator settings")?;

    println!("Available Indicators");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for (name, params, lookback) in describe(&indicators) {
        println!("  {:<18} {:<32} lookback {}", name, params, lookback);
    }

    println!();
    println!("Override parameters under [indicators] in the config file,");
    println!("or with TA__INDICATORS__<NAME>=<value>.");

    Ok(())
}

/// Name, parameters and lookback of every configured indicator.
fn describe(set: &IndicatorSet) -> Vec<(String, String, usize)> {
    let (short, long, signal) = set.macd.spans();
    vec![
        (
            set.sma.name().to_string(),
            format!("window={}", set.sma.window()),
            set.sma.lookback(),
        ),
        (
            set.ema.name().to_string(),
            format!("span={} alpha={:.4}", set.ema.span(), set.ema.alpha()),
            set.ema.lookback(),
        ),
        (
            set.macd.name().to_string(),
            format!("short={} long={} signal={}", short, long, signal),
            set.macd.lookback(),
        ),
        (
            set.rsi.name().to_string(),
            format!("window={}", set.rsi.window()),
            set.rsi.lookback(),
        ),
        (
            set.bollinger.name().to_string(),
            format!(
                "window={} num_std={}",
                set.bollinger.window(),
                set.bollinger.num_std()
            ),
            set.bollinger.lookback(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_defaults() {
        let set = AppConfig::default().indicators.build().unwrap();
        let rows = describe(&set);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], ("SMA".to_string(), "window=20".to_string(), 19));
        assert_eq!(rows[1].1, "span=20 alpha=0.0952");
        assert_eq!(rows[3], ("RSI".to_string(), "window=14".to_string(), 14));
        assert_eq!(rows[4].1, "window=20 num_std=2");
    }
}
