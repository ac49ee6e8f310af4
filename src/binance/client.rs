// =============================================================================
// Mock Binance Client — synthetic klines and 24h tickers
// =============================================================================
//
// Stands in for the Binance REST API, which the dashboard does not talk to.
// Prices follow a slow sine wave around a per-symbol base plus uniform noise,
// which is enough for every indicator to produce a non-trivial reading.
//
// Seeding the generator makes the output reproducible; timestamps are always
// taken from the wall clock.
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::market_data::{Candle, Interval, MarketDataSource, Ticker24h};

/// Binance rejects kline requests above this limit.
pub const MAX_KLINE_LIMIT: u32 = 1000;

/// Symbols returned by the ticker endpoint when none is requested.
pub const DEFAULT_TICKER_SYMBOLS: &[&str] = &["BTCUSDT", "ETHUSDT", "BNBUSDT", "ADAUSDT"];

const BTC_BASE_PRICE: f64 = 43_000.0;
const ALT_BASE_PRICE: f64 = 2_500.0;
const WAVE_AMPLITUDE: f64 = 1_000.0;
const WAVE_STEP: f64 = 0.1;
const NOISE_AMPLITUDE: f64 = 500.0;
const DAY_MS: i64 = 86_400_000;

/// Market-data source that fabricates plausible Binance responses.
pub struct MockBinanceClient {
    rng: Mutex<StdRng>,
}

impl MockBinanceClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create a client whose noise comes from OS entropy.
    pub fn new() -> Self {
        debug!("MockBinanceClient initialised (entropy seed)");
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a client with a fixed seed for reproducible prices.
    pub fn with_seed(seed: u64) -> Self {
        debug!(seed, "MockBinanceClient initialised (fixed seed)");
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn base_price(symbol: &str) -> f64 {
        if symbol == "BTCUSDT" {
            BTC_BASE_PRICE
        } else {
            ALT_BASE_PRICE
        }
    }

    // -------------------------------------------------------------------------
    // Generators
    // -------------------------------------------------------------------------

    /// Build `limit` candles ending at `now_ms`, oldest first.
    pub fn klines_at(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
        now_ms: i64,
    ) -> Result<Vec<Candle>> {
        if limit == 0 || limit > MAX_KLINE_LIMIT {
            anyhow::bail!("kline limit must be between 1 and {MAX_KLINE_LIMIT}, got {limit}");
        }

        let symbol = symbol.trim().to_uppercase();
        let base = Self::base_price(&symbol);
        let step = interval.duration_ms();
        let n = i64::from(limit);

        let mut rng = self.rng.lock();
        let candles = (0..n)
            .map(|i| {
                let price = base
                    + (i as f64 * WAVE_STEP).sin() * WAVE_AMPLITUDE
                    + rng.gen::<f64>() * NOISE_AMPLITUDE;
                Candle {
                    open_time: now_ms - (n - i) * step,
                    close_time: now_ms - (n - i - 1) * step,
                    open: price,
                    high: price * 1.01,
                    low: price * 0.99,
                    close: price,
                    volume: 1_000.0,
                    quote_volume: 1_000_000.0,
                    trades_count: 100,
                    taker_buy_volume: 500.0,
                    taker_buy_quote_volume: 500_000.0,
                }
            })
            .collect();

        Ok(candles)
    }

    /// Build 24h tickers for `symbol`, or for [`DEFAULT_TICKER_SYMBOLS`].
    pub fn tickers_at(&self, symbol: Option<&str>, now_ms: i64) -> Vec<Ticker24h> {
        let symbols: Vec<String> = match symbol {
            Some(s) => vec![s.trim().to_uppercase()],
            None => DEFAULT_TICKER_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        };

        let mut rng = self.rng.lock();
        symbols
            .into_iter()
            .map(|symbol| Ticker24h {
                symbol,
                price_change: rng.gen::<f64>() * 2_000.0 - 1_000.0,
                price_change_percent: rng.gen::<f64>() * 10.0 - 5.0,
                weighted_avg_price: 43_000.0,
                prev_close_price: 42_500.0,
                last_price: 43_000.0 + rng.gen::<f64>() * 1_000.0 - 500.0,
                last_qty: 0.1,
                bid_price: 42_950.0,
                ask_price: 43_050.0,
                open_price: 42_500.0,
                high_price: 44_000.0,
                low_price: 42_000.0,
                volume: rng.gen::<f64>() * 100_000.0,
                quote_volume: rng.gen::<f64>() * 1_000_000_000.0,
                open_time: now_ms - DAY_MS,
                close_time: now_ms,
                first_id: 1,
                last_id: 1000,
                count: 1000,
            })
            .collect()
    }
}

impl Default for MockBinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for MockBinanceClient {
    #[instrument(skip(self), name = "binance::get_klines")]
    async fn get_klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<Vec<Candle>> {
        let candles = self.klines_at(symbol, interval, limit, Utc::now().timestamp_millis())?;
        debug!(symbol, %interval, count = candles.len(), "mock klines generated");
        Ok(candles)
    }

    #[instrument(skip(self), name = "binance::get_ticker_24hr")]
    async fn get_ticker_24hr(&self, symbol: Option<&str>) -> Result<Vec<Ticker24h>> {
        let tickers = self.tickers_at(symbol, Utc::now().timestamp_millis());
        debug!(count = tickers.len(), "mock tickers generated");
        Ok(tickers)
    }
}

impl std::fmt::Debug for MockBinanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBinanceClient").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::closes;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn klines_have_requested_length_and_spacing() {
        let client = MockBinanceClient::with_seed(7);
        let candles = client.klines_at("BTCUSDT", Interval::M5, 100, NOW).unwrap();
        assert_eq!(candles.len(), 100);

        assert_eq!(candles[0].open_time, NOW - 100 * 300_000);
        let last = candles.last().unwrap();
        assert_eq!(last.close_time, NOW);
        for pair in candles.windows(2) {
            assert_eq!(pair[1].open_time - pair[0].open_time, 300_000);
            assert_eq!(pair[0].close_time, pair[1].open_time);
        }
    }

    #[test]
    fn kline_prices_follow_base_wave_and_noise() {
        let client = MockBinanceClient::with_seed(1);
        let candles = client.klines_at("btcusdt", Interval::M1, 200, NOW).unwrap();
        for (i, c) in candles.iter().enumerate() {
            let wave = BTC_BASE_PRICE + (i as f64 * WAVE_STEP).sin() * WAVE_AMPLITUDE;
            assert!(c.close >= wave && c.close < wave + NOISE_AMPLITUDE);
            assert_eq!(c.open, c.close);
            assert!((c.high - c.close * 1.01).abs() < 1e-9);
            assert!((c.low - c.close * 0.99).abs() < 1e-9);
        }
    }

    #[test]
    fn non_btc_symbols_use_alt_base() {
        let client = MockBinanceClient::with_seed(1);
        let candles = client.klines_at("ETHUSDT", Interval::H1, 1, NOW).unwrap();
        assert!(candles[0].close >= ALT_BASE_PRICE && candles[0].close < ALT_BASE_PRICE + 500.0);
    }

    #[test]
    fn same_seed_same_prices() {
        let a = MockBinanceClient::with_seed(42).klines_at("BTCUSDT", Interval::M1, 50, NOW).unwrap();
        let b = MockBinanceClient::with_seed(42).klines_at("BTCUSDT", Interval::M1, 50, NOW).unwrap();
        assert_eq!(closes(&a), closes(&b));
    }

    #[test]
    fn limit_out_of_range_is_rejected() {
        let client = MockBinanceClient::with_seed(0);
        assert!(client.klines_at("BTCUSDT", Interval::M1, 0, NOW).is_err());
        assert!(client.klines_at("BTCUSDT", Interval::M1, 1001, NOW).is_err());
        assert!(client.klines_at("BTCUSDT", Interval::M1, 1000, NOW).is_ok());
    }

    #[test]
    fn ticker_defaults_to_watch_list() {
        let client = MockBinanceClient::with_seed(3);
        let tickers = client.tickers_at(None, NOW);
        let symbols: Vec<&str> = tickers.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, DEFAULT_TICKER_SYMBOLS);
    }

    #[test]
    fn ticker_for_one_symbol_within_ranges() {
        let client = MockBinanceClient::with_seed(3);
        let tickers = client.tickers_at(Some("solusdt"), NOW);
        assert_eq!(tickers.len(), 1);
        let t = &tickers[0];
        assert_eq!(t.symbol, "SOLUSDT");
        assert!((-1_000.0..1_000.0).contains(&t.price_change));
        assert!((-5.0..5.0).contains(&t.price_change_percent));
        assert!((42_500.0..43_500.0).contains(&t.last_price));
        assert_eq!(t.open_time, NOW - DAY_MS);
        assert_eq!(t.close_time, NOW);
    }

    #[tokio::test]
    async fn trait_methods_delegate_to_generators() {
        let client = MockBinanceClient::with_seed(9);
        let candles = client.get_klines("BTCUSDT", Interval::M15, 30).await.unwrap();
        assert_eq!(candles.len(), 30);
        let tickers = client.get_ticker_24hr(Some("ETHUSDT")).await.unwrap();
        assert_eq!(tickers[0].symbol, "ETHUSDT");
    }
}
