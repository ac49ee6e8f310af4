// =============================================================================
// GoCripto Dashboard — Main Entry Point
// =============================================================================
//
// Serves market data and technical indicators to the dashboard front-end.
// Market data comes from the mock Binance client; no exchange is contacted.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod binance;
mod config;
mod indicators;
mod market_data;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::{DashboardConfig, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("GoCripto dashboard backend starting up");

    let config = DashboardConfig::load_or_default(DEFAULT_CONFIG_PATH);

    info!(symbols = ?config.symbols, "Configured trading pairs");
    info!(
        interval = %config.default_interval,
        limit = config.default_limit,
        seeded = config.mock_seed.is_some(),
        "Using mock market data"
    );

    // ── 2. Shared state ──────────────────────────────────────────────────
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::with_mock_market(config));

    // ── 3. API server ────────────────────────────────────────────────────
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("GoCripto dashboard backend shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
