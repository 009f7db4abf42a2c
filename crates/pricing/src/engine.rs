//! Derived pricing engine
//!
//! Orchestrates the quote and indexer adapters behind the keyed cache.
//! Every fetch is gated by an explicit `can_fetch_*` predicate, issued at
//! most once per distinct key while outstanding, and re-attempted only when
//! the key changes or a caller invalidates it — never via internal retries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use amm_quote_client::{QuoteClient, SwapPreview};
use indexer_client::{IndexerApi, IndexerError, PoolReserves};
use lagoon_core::{AssetId, AssetMetadata, AssetReference, PoolId, PricingConfig, QuoteError};
use tokio::sync::Mutex;
use tracing::warn;

use crate::apr;
use crate::cache::{CacheStatus, Clock, QueryCache, SystemClock};
use crate::liquidity;
use crate::state::{AprResult, Derived, ReservesPriceKey, ReservesPriceRequest};

/// Raw probe size: `probe_amount` whole tokens in the sell asset's
/// smallest unit. None when the asset's decimals overflow u128 range.
fn probe_raw_amount(probe_amount: u64, decimals: u8) -> Option<u128> {
    10u128
        .checked_pow(decimals as u32)?
        .checked_mul(probe_amount as u128)
}

/// Read-through pricing engine over a quote client and an indexer
pub struct PricingEngine<Q, I> {
    quote: Q,
    indexer: I,
    config: PricingConfig,
    clock: Arc<dyn Clock>,
    reserves_cache: Mutex<QueryCache<ReservesPriceKey, f64>>,
    apr_cache: Mutex<QueryCache<String, AprResult>>,
    metadata: Mutex<HashMap<AssetId, AssetMetadata>>,
}

impl<Q: QuoteClient, I: IndexerApi> PricingEngine<Q, I> {
    pub fn new(quote: Q, indexer: I, config: PricingConfig) -> Self {
        Self::with_clock(quote, indexer, config, Arc::new(SystemClock))
    }

    pub fn with_clock(quote: Q, indexer: I, config: PricingConfig, clock: Arc<dyn Clock>) -> Self {
        let reserves_cache = QueryCache::new(
            Duration::from_secs(config.reserves_fresh_secs),
            Duration::from_secs(config.reserves_expire_secs),
            clock.clone(),
        );
        let apr_cache = QueryCache::new(
            Duration::from_secs(config.apr_fresh_secs),
            Duration::from_secs(config.apr_fresh_secs * 2),
            clock.clone(),
        );
        Self {
            quote,
            indexer,
            config,
            clock,
            reserves_cache: Mutex::new(reserves_cache),
            apr_cache: Mutex::new(apr_cache),
            metadata: Mutex::new(HashMap::new()),
        }
    }

    /// Gate for the reserves-price derivation: both assets selected and a
    /// non-empty route
    pub fn can_fetch_reserves_price(request: &ReservesPriceRequest) -> bool {
        request.sell.is_some() && request.buy.is_some() && !request.route.is_empty()
    }

    /// Gate for swap previews: a positive raw amount and a route
    pub fn can_fetch_preview(amount_in: u128, route: &[PoolId]) -> bool {
        amount_in > 0 && !route.is_empty()
    }

    /// Gate for the APR derivation
    pub fn can_fetch_apr(pool_id: &str) -> bool {
        !pool_id.is_empty()
    }

    /// Is the quote service reachable? Surface for the UI's connection gate.
    pub async fn quote_available(&self) -> bool {
        self.quote.is_available().await
    }

    /// Current pool-implied price for the sell→buy direction, derived by
    /// probing the route with a fixed notional amount. Cached per
    /// (sell, buy, route-set) key.
    pub async fn reserves_price(&self, request: &ReservesPriceRequest) -> Derived<f64> {
        let (sell, buy) = match (&request.sell, &request.buy) {
            (Some(sell), Some(buy)) if Self::can_fetch_reserves_price(request) => (sell, buy),
            _ => return Derived::idle(),
        };
        let key = ReservesPriceKey::new(&sell.asset_id, &buy.asset_id, &request.route);

        let ticket = {
            let mut cache = self.reserves_cache.lock().await;
            match cache.status(&key) {
                CacheStatus::Fresh(value) => return Derived::ready(value),
                CacheStatus::Fetching(value) => return Derived::loading(value),
                CacheStatus::Failed(error) => return Derived::failed(error),
                CacheStatus::Miss(_) => {}
            }
            cache.begin_fetch(&key)
        };
        let Some(ticket) = ticket else {
            // Lost the race to another caller for the same key
            return Derived::loading(None);
        };

        let result = self
            .fetch_reserves_price(sell, buy, &request.route)
            .await
            .map_err(|e| e.to_string());

        let mut cache = self.reserves_cache.lock().await;
        cache.commit(ticket, result);
        match cache.status(&key) {
            CacheStatus::Fresh(value) => Derived::ready(value),
            CacheStatus::Failed(error) => Derived::failed(error),
            // Invalidated while in flight: the response was discarded
            _ => Derived::idle(),
        }
    }

    async fn fetch_reserves_price(
        &self,
        sell: &AssetReference,
        buy: &AssetReference,
        route: &[PoolId],
    ) -> Result<f64, QuoteError> {
        let probe_raw = probe_raw_amount(self.config.probe_amount, sell.decimals())
            .ok_or_else(|| QuoteError::ParseError("probe amount overflow".to_string()))?;

        let preview = self
            .quote
            .preview_swap_exact_input(&sell.asset_id, probe_raw, route)
            .await?;

        let price = (preview.output_amount as f64 / probe_raw as f64)
            * 10f64.powi(sell.decimals() as i32)
            / 10f64.powi(buy.decimals() as i32);
        Ok(price)
    }

    /// Simulate an exact-input swap. A zero amount resolves to the idle
    /// "no result" state without touching the adapter. Ephemeral: not
    /// cached, one result per query cycle.
    pub async fn exact_input_preview(
        &self,
        asset_in: &AssetId,
        amount_in: u128,
        route: &[PoolId],
    ) -> Derived<SwapPreview> {
        if !Self::can_fetch_preview(amount_in, route) {
            return Derived::idle();
        }
        match self
            .quote
            .preview_swap_exact_input(asset_in, amount_in, route)
            .await
        {
            Ok(preview) => Derived::ready(preview),
            Err(e) => Derived::failed(e.to_string()),
        }
    }

    /// Annualized fee yield for a pool over the trailing window. Cached per
    /// pool id. A pool with zero TVL (or unknown to the indexer) yields a
    /// zero result rather than an error.
    pub async fn pool_apr(&self, pool_id: &str) -> Derived<AprResult> {
        if !Self::can_fetch_apr(pool_id) {
            return Derived::idle();
        }
        let key = pool_id.to_string();

        let ticket = {
            let mut cache = self.apr_cache.lock().await;
            match cache.status(&key) {
                CacheStatus::Fresh(value) => return Derived::ready(value),
                CacheStatus::Fetching(value) => return Derived::loading(value),
                CacheStatus::Failed(error) => return Derived::failed(error),
                CacheStatus::Miss(_) => {}
            }
            cache.begin_fetch(&key)
        };
        let Some(ticket) = ticket else {
            return Derived::loading(None);
        };

        let result = self.fetch_pool_apr(pool_id).await.map_err(|e| e.to_string());

        let mut cache = self.apr_cache.lock().await;
        cache.commit(ticket, result);
        match cache.status(&key) {
            CacheStatus::Fresh(value) => Derived::ready(value),
            CacheStatus::Failed(error) => Derived::failed(error),
            _ => Derived::idle(),
        }
    }

    async fn fetch_pool_apr(&self, pool_id: &str) -> Result<AprResult, IndexerError> {
        let now_secs = (self.clock.now_millis() / 1000) as i64;
        let since = now_secs - self.config.apr_window_secs as i64;

        let snapshots = self.indexer.pool_snapshots(pool_id, since).await?;
        let state = self.indexer.pool_state(pool_id).await?;

        let Some(state) = state else {
            return Ok(AprResult {
                apr: 0.0,
                tvl_usd: 0.0,
                reserve0: 0.0,
                reserve1: 0.0,
            });
        };

        let fees_24h = apr::total_fees(&snapshots);
        Ok(AprResult {
            apr: apr::annualized_apr(fees_24h, state.tvl_usd),
            tvl_usd: state.tvl_usd,
            reserve0: state.reserve0_decimal,
            reserve1: state.reserve1_decimal,
        })
    }

    /// Counterpart amount for an add-liquidity form, proportional to the
    /// pool's current reserve ratio. `input_is_reserve0` marks which side
    /// the typed amount belongs to.
    pub async fn add_liquidity_preview(
        &self,
        pool_id: &str,
        amount: f64,
        input_is_reserve0: bool,
    ) -> Derived<f64> {
        if pool_id.is_empty() || !(amount > 0.0) || !amount.is_finite() {
            return Derived::idle();
        }
        let state = match self.indexer.pool_state(pool_id).await {
            Ok(Some(state)) => state,
            Ok(None) => return Derived::idle(),
            Err(e) => return Derived::failed(e.to_string()),
        };

        let (reserve_in, reserve_out) = if input_is_reserve0 {
            (state.reserve0_decimal, state.reserve1_decimal)
        } else {
            (state.reserve1_decimal, state.reserve0_decimal)
        };
        match liquidity::counterpart_amount(amount, reserve_in, reserve_out) {
            Some(counterpart) => Derived::ready(counterpart),
            None => Derived::idle(),
        }
    }

    /// Resolve an asset reference, memoizing metadata per asset id.
    /// Metadata is immutable once resolved; a miss reads as 0 decimals.
    pub async fn resolve_asset(&self, asset_id: &AssetId) -> AssetReference {
        {
            let memo = self.metadata.lock().await;
            if let Some(metadata) = memo.get(asset_id) {
                return AssetReference::new(asset_id.clone(), metadata.clone());
            }
        }

        match self.indexer.asset_metadata(asset_id).await {
            Ok(Some(metadata)) => {
                let mut memo = self.metadata.lock().await;
                memo.insert(asset_id.clone(), metadata.clone());
                AssetReference::new(asset_id.clone(), metadata)
            }
            Ok(None) => AssetReference::new(asset_id.clone(), AssetMetadata::default()),
            Err(e) => {
                warn!("Asset metadata lookup failed for {}: {}", asset_id, e);
                AssetReference::new(asset_id.clone(), AssetMetadata::default())
            }
        }
    }

    /// Reserves for a set of pools (list views); pass-through, not cached
    pub async fn pools_with_reserves(&self, pool_ids: &[String]) -> Derived<Vec<PoolReserves>> {
        if pool_ids.is_empty() {
            return Derived::idle();
        }
        match self.indexer.pools_with_reserves(pool_ids).await {
            Ok(pools) => Derived::ready(pools),
            Err(e) => Derived::failed(e.to_string()),
        }
    }

    /// Manual refresh: drop the cached reserves price for a request's key
    pub async fn invalidate_reserves_price(&self, request: &ReservesPriceRequest) {
        if let (Some(sell), Some(buy)) = (&request.sell, &request.buy) {
            let key = ReservesPriceKey::new(&sell.asset_id, &buy.asset_id, &request.route);
            self.reserves_cache.lock().await.invalidate(&key);
        }
    }

    /// Manual refresh: drop the cached APR for a pool
    pub async fn invalidate_apr(&self, pool_id: &str) {
        self.apr_cache.lock().await.invalidate(&pool_id.to_string());
    }
}
