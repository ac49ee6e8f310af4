use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV candle (Binance kline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub quote_volume: f64,
    pub trades_count: u64,
    pub taker_buy_volume: f64,
    pub taker_buy_quote_volume: f64,
}

/// Extract the closing-price series (oldest first) from `candles`.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// Kline interval in Binance notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    M1,
    M3,
    M5,
    M15,
    M30,
    H1,
    H2,
    H4,
    H6,
    H8,
    H12,
    D1,
    D3,
    W1,
}

const MINUTE_MS: i64 = 60_000;

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M3 => "3m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H2 => "2h",
            Self::H4 => "4h",
            Self::H6 => "6h",
            Self::H8 => "8h",
            Self::H12 => "12h",
            Self::D1 => "1d",
            Self::D3 => "3d",
            Self::W1 => "1w",
        }
    }

    /// Length of one candle in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        let minutes = match self {
            Self::M1 => 1,
            Self::M3 => 3,
            Self::M5 => 5,
            Self::M15 => 15,
            Self::M30 => 30,
            Self::H1 => 60,
            Self::H2 => 2 * 60,
            Self::H4 => 4 * 60,
            Self::H6 => 6 * 60,
            Self::H8 => 8 * 60,
            Self::H12 => 12 * 60,
            Self::D1 => 24 * 60,
            Self::D3 => 3 * 24 * 60,
            Self::W1 => 7 * 24 * 60,
        };
        minutes * MINUTE_MS
    }
}

impl FromStr for Interval {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let iv = match s.trim() {
            "1m" => Self::M1,
            "3m" => Self::M3,
            "5m" => Self::M5,
            "15m" => Self::M15,
            "30m" => Self::M30,
            "1h" => Self::H1,
            "2h" => Self::H2,
            "4h" => Self::H4,
            "6h" => Self::H6,
            "8h" => Self::H8,
            "12h" => Self::H12,
            "1d" => Self::D1,
            "3d" => Self::D3,
            "1w" => Self::W1,
            other => anyhow::bail!("unsupported kline interval '{other}'"),
        };
        Ok(iv)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle(open_time: i64, close: f64) -> Candle {
        Candle {
            open_time,
            close_time: open_time + 59_999,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100.0,
            quote_volume: 200.0,
            trades_count: 50,
            taker_buy_volume: 60.0,
            taker_buy_quote_volume: 120.0,
        }
    }

    #[test]
    fn closes_preserve_order() {
        let candles: Vec<Candle> = (0..4)
            .map(|i| sample_candle(i * 60_000, 100.0 + i as f64))
            .collect();
        assert_eq!(closes(&candles), vec![100.0, 101.0, 102.0, 103.0]);
    }

    #[test]
    fn closes_of_nothing_is_empty() {
        assert!(closes(&[]).is_empty());
    }

    #[test]
    fn interval_parse_and_duration() {
        assert_eq!("1m".parse::<Interval>().unwrap().duration_ms(), 60_000);
        assert_eq!("4h".parse::<Interval>().unwrap().duration_ms(), 14_400_000);
        assert_eq!("1d".parse::<Interval>().unwrap(), Interval::D1);
        assert_eq!(Interval::W1.duration_ms(), 604_800_000);
    }

    #[test]
    fn interval_rejects_unknown() {
        assert!("7m".parse::<Interval>().is_err());
        assert!("".parse::<Interval>().is_err());
    }

    #[test]
    fn interval_display_roundtrips() {
        for s in ["1m", "15m", "1h", "12h", "3d", "1w"] {
            assert_eq!(s.parse::<Interval>().unwrap().to_string(), s);
        }
    }
}
