// =============================================================================
// Dashboard Configuration — JSON file, env overrides, atomic save
// =============================================================================
//
// Every field carries a serde default so that a partial or older config file
// still loads. Environment variables (optionally from `.env`) take precedence
// over the file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::indicators::IndicatorParams;

pub const DEFAULT_CONFIG_PATH: &str = "dashboard_config.json";

const ENV_SYMBOLS: &str = "GOCRIPTO_SYMBOLS";
const ENV_BIND_ADDR: &str = "GOCRIPTO_BIND_ADDR";
const ENV_MOCK_SEED: &str = "GOCRIPTO_MOCK_SEED";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_title() -> String {
    "GoCripto - AI-Powered Crypto Analysis Platform".to_string()
}

fn default_description() -> String {
    "AI-Powered Crypto Analysis Platform with real-time data and SMARTSIGNALS.".to_string()
}

fn default_symbols() -> Vec<String> {
    vec![
        "BTCUSDT".to_string(),
        "ETHUSDT".to_string(),
        "BNBUSDT".to_string(),
        "ADAUSDT".to_string(),
    ]
}

fn default_interval() -> String {
    "1h".to_string()
}

fn default_limit() -> u32 {
    100
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

// =============================================================================
// DashboardConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    // --- Page metadata -------------------------------------------------------
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,

    // --- Market data ---------------------------------------------------------

    /// Symbols shown on the dashboard.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Kline interval used when a request does not name one.
    #[serde(default = "default_interval")]
    pub default_interval: String,

    /// Number of klines fetched when a request does not name a limit.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Fixed seed for the mock client; `None` draws from OS entropy.
    #[serde(default)]
    pub mock_seed: Option<u64>,

    // --- Server --------------------------------------------------------------
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    // --- Indicators ----------------------------------------------------------
    #[serde(default)]
    pub indicators: IndicatorParams,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            symbols: default_symbols(),
            default_interval: default_interval(),
            default_limit: default_limit(),
            mock_seed: None,
            bind_addr: default_bind_addr(),
            indicators: IndicatorParams::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dashboard config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse dashboard config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbols = ?config.symbols,
            "dashboard config loaded"
        );

        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is missing or
    /// malformed, then apply environment overrides.
    ///
    /// A missing file is created with the defaults so they can be edited.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut config = Self::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            let defaults = Self::default();
            if !path.exists() {
                if let Err(e) = defaults.save(path) {
                    warn!(error = %e, "Failed to write default config");
                }
            }
            defaults
        });
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `GOCRIPTO_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(syms) = lookup(ENV_SYMBOLS) {
            let symbols: Vec<String> = syms
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
            if symbols.is_empty() {
                warn!(var = ENV_SYMBOLS, "ignoring empty symbol override");
            } else {
                self.symbols = symbols;
            }
        }

        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr;
        }

        if let Some(seed) = lookup(ENV_MOCK_SEED) {
            match seed.trim().parse::<u64>() {
                Ok(s) => self.mock_seed = Some(s),
                Err(e) => warn!(var = ENV_MOCK_SEED, value = %seed, error = %e, "ignoring invalid seed"),
            }
        }
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise dashboard config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "dashboard config saved (atomic)");
        Ok(())
    }
}
