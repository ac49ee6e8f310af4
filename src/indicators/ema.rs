// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// Formula:
//   k     = 2 / (period + 1)
//   EMA_t = close_t * k + EMA_{t-1} * (1 - k)
//
// The EMA is seeded with the first close and folded over the *whole* series.
// `period` only chooses the smoothing constant; it does not limit the window.
// =============================================================================

/// Return the final EMA value of `closes` for the given `period`.
///
/// An empty series yields `0.0`.
pub fn calculate_ema(closes: &[f64], period: usize) -> f64 {
    let Some((&first, rest)) = closes.split_first() else {
        return 0.0;
    };

    let k = 2.0 / (period as f64 + 1.0);
    rest.iter()
        .fold(first, |ema, &close| close * k + ema * (1.0 - k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert_eq!(calculate_ema(&[], 12), 0.0);
    }

    #[test]
    fn ema_single_value_is_seed() {
        assert_eq!(calculate_ema(&[42.5], 26), 42.5);
    }

    #[test]
    fn ema_flat_series_is_constant() {
        let closes = vec![7.0; 50];
        assert!((calculate_ema(&closes, 9) - 7.0).abs() < 1e-10);
    }

    #[test]
    fn ema_known_values() {
        // k = 2/6 = 1/3, seed 1.0
        //   2: 2/3 + 2/3       = 4/3
        //   3: 1   + 8/9       = 17/9
        let ema = calculate_ema(&[1.0, 2.0, 3.0], 5);
        assert!((ema - 17.0 / 9.0).abs() < 1e-10, "got {ema}");
    }

    #[test]
    fn ema_uses_whole_series_regardless_of_period() {
        // A period longer than the input still folds every value.
        let closes = [10.0, 20.0];
        let k = 2.0 / 101.0;
        let expected = 20.0 * k + 10.0 * (1.0 - k);
        assert!((calculate_ema(&closes, 100) - expected).abs() < 1e-10);
    }

    #[test]
    fn shorter_period_reacts_faster() {
        let closes: Vec<f64> = (1..=40).map(|x| x as f64).collect();
        assert!(calculate_ema(&closes, 12) > calculate_ema(&closes, 26));
    }
}
