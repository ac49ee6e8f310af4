// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   macd      = EMA_fast - EMA_slow
//   signal    = macd * 0.9
//   histogram = macd - signal
//
// The signal line is an approximation, not an EMA of the MACD history. The
// `signal_period` argument is accepted for call-site compatibility and has no
// effect on the result.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::ema::calculate_ema;

/// Factor applied to the MACD line to approximate the signal line.
pub const SIGNAL_FACTOR: f64 = 0.9;

/// MACD line, signal line and histogram for the latest close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Calculate MACD for `closes`.
///
/// Returns all zeros when there are fewer than `slow_period` closes.
pub fn calculate_macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    _signal_period: usize,
) -> MacdResult {
    if closes.len() < slow_period {
        return MacdResult::default();
    }

    let macd = calculate_ema(closes, fast_period) - calculate_ema(closes, slow_period);
    let signal = macd * SIGNAL_FACTOR;

    MacdResult {
        macd,
        signal,
        histogram: macd - signal,
    }
}
