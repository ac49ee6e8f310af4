// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/` and are public. CORS is permissive so
// the dashboard front-end can be served from any origin.
//
// Validation failures return 400 and market-data failures return 500, both
// with an `{ "error": "..." }` body.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

use crate::app_state::AppState;
use crate::binance::client::MAX_KLINE_LIMIT;
use crate::indicators::IndicatorSnapshot;
use crate::market_data::{closes, Candle, Interval, Ticker24h};

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
}

fn upstream_failure(err: anyhow::Error) -> ApiError {
    error!(error = %err, "market data request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": format!("{err:#}") })),
    )
}

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/meta", get(meta))
        .route("/api/v1/symbols", get(symbols))
        .route("/api/v1/klines/:symbol", get(klines))
        .route("/api/v1/ticker", get(ticker))
        .route("/api/v1/indicators/:symbol", get(indicators))
        .route("/api/v1/chart/:symbol", get(chart))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health & metadata
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.uptime_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

#[derive(Serialize)]
struct MetaResponse {
    title: String,
    description: String,
}

async fn meta(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = state.config.read();
    Json(MetaResponse {
        title: config.title.clone(),
        description: config.description.clone(),
    })
}

async fn symbols(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let symbols = state.config.read().symbols.clone();
    Json(symbols)
}

// =============================================================================
// Market data
// =============================================================================

#[derive(Debug, Deserialize)]
struct KlineQuery {
    #[serde(default)]
    interval: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
}

/// Fill in interval and limit from config and validate both.
fn resolve_query(state: &AppState, query: &KlineQuery) -> Result<(Interval, u32), ApiError> {
    let (default_interval, default_limit) = {
        let config = state.config.read();
        (config.default_interval.clone(), config.default_limit)
    };

    let raw = query.interval.as_deref().unwrap_or(&default_interval);
    let interval: Interval = raw.parse().map_err(bad_request)?;

    let limit = query.limit.unwrap_or(default_limit);
    if limit == 0 || limit > MAX_KLINE_LIMIT {
        return Err(bad_request(format!(
            "limit must be between 1 and {MAX_KLINE_LIMIT}, got {limit}"
        )));
    }

    Ok((interval, limit))
}

async fn klines(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<KlineQuery>,
) -> Result<Json<Vec<Candle>>, ApiError> {
    let (interval, limit) = resolve_query(&state, &query)?;
    let symbol = symbol.to_uppercase();

    let candles = state
        .market
        .get_klines(&symbol, interval, limit)
        .await
        .map_err(upstream_failure)?;

    debug!(symbol = %symbol, %interval, count = candles.len(), "klines served");
    Ok(Json(candles))
}

#[derive(Debug, Deserialize)]
struct TickerQuery {
    #[serde(default)]
    symbol: Option<String>,
}

async fn ticker(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TickerQuery>,
) -> Result<Json<Vec<Ticker24h>>, ApiError> {
    let tickers = state
        .market
        .get_ticker_24hr(query.symbol.as_deref())
        .await
        .map_err(upstream_failure)?;
    Ok(Json(tickers))
}

// =============================================================================
// Indicators
// =============================================================================

#[derive(Serialize)]
struct IndicatorResponse {
    symbol: String,
    interval: String,
    snapshot: IndicatorSnapshot,
}

async fn indicators(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<KlineQuery>,
) -> Result<Json<IndicatorResponse>, ApiError> {
    let (interval, limit) = resolve_query(&state, &query)?;
    let symbol = symbol.to_uppercase();

    let candles = state
        .market
        .get_klines(&symbol, interval, limit)
        .await
        .map_err(upstream_failure)?;

    let params = state.config.read().indicators.clone();
    let snapshot = IndicatorSnapshot::compute(&closes(&candles), &params);

    debug!(
        symbol = %symbol,
        %interval,
        rsi = snapshot.rsi,
        macd = snapshot.macd.macd,
        "indicator snapshot computed"
    );

    Ok(Json(IndicatorResponse {
        symbol,
        interval: interval.to_string(),
        snapshot,
    }))
}

// =============================================================================
// Chart placeholder
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChartQuery {
    #[serde(default)]
    interval: Option<String>,
}

#[derive(Serialize)]
struct ChartResponse {
    symbol: String,
    interval: String,
    provider: &'static str,
    message: &'static str,
}

async fn chart(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let raw = match query.interval {
        Some(iv) => iv,
        None => state.config.read().default_interval.clone(),
    };
    let interval: Interval = raw.parse().map_err(bad_request)?;

    Ok(Json(ChartResponse {
        symbol: symbol.to_uppercase(),
        interval: interval.to_string(),
        provider: "TradingView",
        message: "Chart integration will be implemented with TradingView widgets",
    }))
}
