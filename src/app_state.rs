// =============================================================================
// Central Application State
// =============================================================================
//
// Shared by every HTTP handler through `Arc<AppState>`. The config sits behind
// a `parking_lot::RwLock`; the market-data source is a trait object so a live
// exchange client can replace the mock without touching the handlers.
// =============================================================================

use std::sync::Arc;

use parking_lot::RwLock;

use crate::binance::MockBinanceClient;
use crate::config::DashboardConfig;
use crate::market_data::MarketDataSource;

pub struct AppState {
    pub config: RwLock<DashboardConfig>,
    pub market: Arc<dyn MarketDataSource>,
    /// Instant when the server was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: DashboardConfig, market: Arc<dyn MarketDataSource>) -> Self {
        Self {
            config: RwLock::new(config),
            market,
            start_time: std::time::Instant::now(),
        }
    }

    /// Build state backed by the mock client, seeded from `config.mock_seed`.
    pub fn with_mock_market(config: DashboardConfig) -> Self {
        let client = match config.mock_seed {
            Some(seed) => MockBinanceClient::with_seed(seed),
            None => MockBinanceClient::new(),
        };
        Self::new(config, Arc::new(client))
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
