// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator math over a slice of closing prices
// (oldest first). Every function is total: insufficient data yields a fixed
// fallback value instead of an error.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;

use serde::{Deserialize, Serialize};

pub use bollinger::{calculate_bollinger, BollingerBands};
pub use macd::{calculate_macd, MacdResult};
pub use rsi::{calculate_rsi, rsi_zone, RsiZone};

fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_std_dev() -> f64 {
    2.0
}

/// Window lengths and multipliers used when computing a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    /// Accepted for completeness; the signal line is approximated.
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    #[serde(default = "default_bollinger_std_dev")]
    pub bollinger_std_dev: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            bollinger_period: default_bollinger_period(),
            bollinger_std_dev: default_bollinger_std_dev(),
        }
    }
}

/// Every indicator the dashboard renders, for a single price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub rsi_zone: RsiZone,
    pub macd: MacdResult,
    pub bollinger: BollingerBands,
    pub last_price: Option<f64>,
    pub samples: usize,
}

impl IndicatorSnapshot {
    pub fn compute(closes: &[f64], params: &IndicatorParams) -> Self {
        let rsi = calculate_rsi(closes, params.rsi_period);
        Self {
            rsi,
            rsi_zone: rsi_zone(rsi),
            macd: calculate_macd(
                closes,
                params.macd_fast,
                params.macd_slow,
                params.macd_signal,
            ),
            bollinger: calculate_bollinger(
                closes,
                params.bollinger_period,
                params.bollinger_std_dev,
            ),
            last_price: closes.last().copied(),
            samples: closes.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_default_windows() {
        let p = IndicatorParams::default();
        assert_eq!(p.rsi_period, 14);
        assert_eq!((p.macd_fast, p.macd_slow, p.macd_signal), (12, 26, 9));
        assert_eq!(p.bollinger_period, 20);
        assert!((p.bollinger_std_dev - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn params_partial_json_fills_defaults() {
        let p: IndicatorParams = serde_json::from_str(r#"{ "rsi_period": 7 }"#).unwrap();
        assert_eq!(p.rsi_period, 7);
        assert_eq!(p.macd_slow, 26);
    }

    #[test]
    fn snapshot_on_empty_series() {
        let snap = IndicatorSnapshot::compute(&[], &IndicatorParams::default());
        assert_eq!(snap.rsi, 50.0);
        assert_eq!(snap.rsi_zone, RsiZone::Neutral);
        assert_eq!(snap.macd, MacdResult::default());
        assert_eq!(snap.bollinger, BollingerBands::default());
        assert_eq!(snap.last_price, None);
        assert_eq!(snap.samples, 0);
    }

    #[test]
    fn snapshot_on_rising_series() {
        let closes: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let snap = IndicatorSnapshot::compute(&closes, &IndicatorParams::default());
        assert_eq!(snap.rsi, 100.0);
        assert_eq!(snap.rsi_zone, RsiZone::Overbought);
        assert!(snap.macd.macd > 0.0);
        // Mean of 81..=100.
        assert!((snap.bollinger.middle - 90.5).abs() < 1e-10);
        assert_eq!(snap.last_price, Some(100.0));
        assert_eq!(snap.samples, 100);
    }
}
