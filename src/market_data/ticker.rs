use serde::{Deserialize, Serialize};

/// 24-hour rolling statistics for one symbol, shaped like Binance's
/// `GET /api/v3/ticker/24hr` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub weighted_avg_price: f64,
    pub prev_close_price: f64,
    pub last_price: f64,
    pub last_qty: f64,
    pub bid_price: f64,
    pub ask_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub volume: f64,
    pub quote_volume: f64,
    pub open_time: i64,
    pub close_time: i64,
    pub first_id: u64,
    pub last_id: u64,
    pub count: u64,
}
