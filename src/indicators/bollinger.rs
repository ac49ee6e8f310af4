// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = SMA of the last `period` closes, upper/lower = SMA ± k*σ with
// σ the population standard deviation (divide by `period`).
//
// With fewer than `period` closes the bands fall back to ±2 % around the last
// close (or zero for an empty series).

use serde::{Deserialize, Serialize};

/// Upper, middle and lower band for the latest close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Fixed ±2 % envelope used when there is not enough data.
    fn around(price: f64) -> Self {
        Self {
            upper: price * 1.02,
            middle: price,
            lower: price * 0.98,
        }
    }
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// A `period` of zero is treated as insufficient data.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerBands {
    if period == 0 || closes.len() < period {
        return BollingerBands::around(closes.last().copied().unwrap_or(0.0));
    }

    let window = &closes[closes.len() - period..];
    let period_f = period as f64;
    let sma = window.iter().sum::<f64>() / period_f;
    let variance = window.iter().map(|x| (x - sma).powi(2)).sum::<f64>() / period_f;
    let std_dev = variance.sqrt();

    BollingerBands {
        upper: sma + std_dev * num_std,
        middle: sma,
        lower: sma - std_dev * num_std,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_empty_input_is_zero() {
        assert_eq!(calculate_bollinger(&[], 20, 2.0), BollingerBands::default());
    }

    #[test]
    fn bollinger_insufficient_data_uses_last_close() {
        let bb = calculate_bollinger(&[1.0, 2.0, 100.0], 20, 2.0);
        assert!((bb.upper - 102.0).abs() < 1e-10);
        assert_eq!(bb.middle, 100.0);
        assert!((bb.lower - 98.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_flat_has_zero_width() {
        let bb = calculate_bollinger(&[10.0; 20], 20, 2.0);
        assert_eq!(
            bb,
            BollingerBands {
                upper: 10.0,
                middle: 10.0,
                lower: 10.0
            }
        );
    }

    #[test]
    fn bollinger_uses_only_last_period_closes() {
        // Window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population σ 2.
        let mut closes = vec![1000.0, -1000.0];
        closes.extend([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let bb = calculate_bollinger(&closes, 8, 2.0);
        assert!((bb.middle - 5.0).abs() < 1e-10);
        assert!((bb.upper - 9.0).abs() < 1e-10);
        assert!((bb.lower - 1.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_bands_are_symmetric() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64).cos() * 3.0).collect();
        let bb = calculate_bollinger(&closes, 20, 2.5);
        assert!(((bb.upper - bb.middle) - (bb.middle - bb.lower)).abs() < 1e-10);
        assert!(bb.upper > bb.middle);
    }

    #[test]
    fn bollinger_period_zero_falls_back() {
        let bb = calculate_bollinger(&[50.0], 0, 2.0);
        assert_eq!(bb.middle, 50.0);
        assert!((bb.upper - 51.0).abs() < 1e-10);
    }
}
