//! Configuration types for Lagoon

use serde::{Deserialize, Serialize};

/// AMM quote service connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmConfig {
    /// Quote service URL (e.g., "http://127.0.0.1:8080")
    pub url: String,
}

impl Default for AmmConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

/// Indexer connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// GraphQL endpoint URL
    pub url: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:4350/graphql".to_string(),
        }
    }
}

/// Tunables for the derived pricing engine.
///
/// The staleness windows and the probe amount are deliberately named
/// configuration rather than call-site constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Notional probe size for reserves-price simulation, in whole tokens
    /// of the sell asset. Large enough for a non-zero quote, small enough
    /// not to be the trade whose impact is being measured.
    #[serde(default = "default_probe_amount")]
    pub probe_amount: u64,

    /// Reserves price served without refetch for this long
    #[serde(default = "default_reserves_fresh_secs")]
    pub reserves_fresh_secs: u64,

    /// Reserves price no longer served at all after this long
    #[serde(default = "default_reserves_expire_secs")]
    pub reserves_expire_secs: u64,

    /// APR served without refetch for this long
    #[serde(default = "default_apr_fresh_secs")]
    pub apr_fresh_secs: u64,

    /// Trailing window summed for fee revenue
    #[serde(default = "default_apr_window_secs")]
    pub apr_window_secs: u64,
}

fn default_probe_amount() -> u64 {
    1000
}

fn default_reserves_fresh_secs() -> u64 {
    30
}

fn default_reserves_expire_secs() -> u64 {
    60
}

fn default_apr_fresh_secs() -> u64 {
    60
}

fn default_apr_window_secs() -> u64 {
    24 * 60 * 60
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            probe_amount: default_probe_amount(),
            reserves_fresh_secs: default_reserves_fresh_secs(),
            reserves_expire_secs: default_reserves_expire_secs(),
            apr_fresh_secs: default_apr_fresh_secs(),
            apr_window_secs: default_apr_window_secs(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Quote service connection settings
    #[serde(default)]
    pub amm: AmmConfig,

    /// Indexer connection settings
    #[serde(default)]
    pub indexer: IndexerConfig,

    /// Pricing engine tunables
    #[serde(default)]
    pub pricing: PricingConfig,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_port() -> u16 {
    19080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            amm: AmmConfig::default(),
            indexer: IndexerConfig::default(),
            pricing: PricingConfig::default(),
            api_port: default_api_port(),
        }
    }
}
