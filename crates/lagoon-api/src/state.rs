//! Application state shared across API handlers

use std::sync::Arc;

use amm_quote_client::{AmmClient, QuoteClient};
use indexer_client::IndexerClient;
use lagoon_core::AppConfig;
use pricing::PricingEngine;
use tokio::sync::RwLock;

/// The concrete engine the API serves
pub type Engine = PricingEngine<AmmClient, IndexerClient>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    engine: RwLock<Option<Arc<Engine>>>,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                engine: RwLock::new(None),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Update configuration and drop the cached engine so the next request
    /// builds one against the new endpoints
    pub async fn set_config(&self, config: AppConfig) {
        let mut current = self.inner.config.write().await;
        *current = config;

        let mut engine = self.inner.engine.write().await;
        *engine = None;
    }

    /// Get or create the pricing engine.
    ///
    /// Returns None while the quote service fails its availability probe;
    /// callers answer 503 in that case. A derivation is only ever fetched
    /// once a live connection exists.
    pub async fn engine(&self) -> Option<Arc<Engine>> {
        {
            let engine = self.inner.engine.read().await;
            if engine.is_some() {
                return engine.clone();
            }
        }

        let config = self.inner.config.read().await.clone();
        tracing::info!("Creating pricing engine for {}", config.amm.url);

        let quote = AmmClient::new(&config.amm);
        if !quote.is_available().await {
            tracing::warn!("Quote service unavailable at {}", config.amm.url);
            return None;
        }
        let indexer = IndexerClient::new(&config.indexer);
        let engine = Arc::new(Engine::new(quote, indexer, config.pricing.clone()));

        let mut cached = self.inner.engine.write().await;
        // Double-check after acquiring write lock
        if let Some(ref existing) = *cached {
            return Some(existing.clone());
        }
        *cached = Some(engine.clone());
        Some(engine)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
