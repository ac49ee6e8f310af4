pub mod candle;
pub mod ticker;

use anyhow::Result;
use async_trait::async_trait;

pub use candle::{closes, Candle, Interval};
pub use ticker::Ticker24h;

/// Anything that can hand the dashboard klines and 24h tickers.
///
/// The mock client in [`crate::binance`] is the only implementation today; a
/// live exchange client slots in behind the same contract.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Most recent `limit` candles for `symbol`, oldest first.
    async fn get_klines(&self, symbol: &str, interval: Interval, limit: u32)
        -> Result<Vec<Candle>>;

    /// 24h tickers for `symbol`, or for the default watch list when `None`.
    async fn get_ticker_24hr(&self, symbol: Option<&str>) -> Result<Vec<Ticker24h>>;
}
