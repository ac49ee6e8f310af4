// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// Step 1 — Seed average gain / average loss with the mean of the first
//          `period` deltas.
// Step 2 — Fold every later delta in with Wilder's smoothing:
//            avg = (prev_avg * (period - 1) + current) / period
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Thresholds:  RSI >= 70 => OVERBOUGHT,  RSI <= 30 => OVERSOLD.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Value returned when there are not enough closes to seed the averages.
pub const NEUTRAL_RSI: f64 = 50.0;

const OVERBOUGHT: f64 = 70.0;
const OVERSOLD: f64 = 30.0;

/// Compute the most recent RSI value for `closes`.
///
/// # Edge cases
/// - `closes.len() < period + 1` => `50.0` (neutral, not an error)
/// - `period == 0` => `50.0`
/// - Average loss of zero after smoothing => `100.0`
pub fn calculate_rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let period_f = period as f64;

    // --- Seed averages from the first `period` deltas ------------------------
    let (gains, losses) = closes[..=period]
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(g, l), change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        });

    let mut avg_gain = gains / period_f;
    let mut avg_loss = losses / period_f;

    // --- Wilder's smoothing for the remaining deltas -------------------------
    for w in closes[period..].windows(2) {
        let change = w[1] - w[0];
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Coarse reading of an RSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "OVERBOUGHT"),
            Self::Oversold => write!(f, "OVERSOLD"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Classify an RSI value into overbought / oversold / neutral.
pub fn rsi_zone(value: f64) -> RsiZone {
    if value >= OVERBOUGHT {
        RsiZone::Overbought
    } else if value <= OVERSOLD {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}
