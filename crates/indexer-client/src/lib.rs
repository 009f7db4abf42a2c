//! indexer-client: GraphQL client for the DEX indexer
//!
//! Issues parameterized queries over plain HTTP POST and maps the
//! `{data, errors}` envelope into typed results. Read-only and idempotent;
//! safe to retry, though the pricing engine never retries on its own.
//!
//! Numeric fields arrive from the indexer as strings and are parsed
//! leniently: an absent or unparsable value reads as 0.

pub mod queries;

use std::time::Duration;

use async_trait::async_trait;
use lagoon_core::{AssetId, AssetMetadata, IndexerConfig};
pub use lagoon_core::IndexerError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// Default timeout for indexer calls (15 seconds)
const INDEXER_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Result type for indexer operations
pub type Result<T> = std::result::Result<T, IndexerError>;

/// One fee snapshot inside the trailing window
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSnapshot {
    pub fees_usd: f64,
    /// Unix seconds
    pub timestamp: i64,
}

/// Current pool-level aggregates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolState {
    pub tvl_usd: f64,
    pub reserve0_decimal: f64,
    pub reserve1_decimal: f64,
}

/// Pool row for list views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolReserves {
    pub pool_id: String,
    pub tvl_usd: f64,
    pub reserve0_decimal: f64,
    pub reserve1_decimal: f64,
}

/// Boundary to the indexer service
#[async_trait]
pub trait IndexerApi: Send + Sync {
    /// Fee snapshots for `pool_id` with `timestamp > since` (unix seconds)
    async fn pool_snapshots(&self, pool_id: &str, since: i64) -> Result<Vec<PoolSnapshot>>;

    /// Current TVL and reserves; `None` when the pool is not indexed
    async fn pool_state(&self, pool_id: &str) -> Result<Option<PoolState>>;

    /// Display metadata for an asset; `None` when unknown to the indexer
    async fn asset_metadata(&self, asset_id: &AssetId) -> Result<Option<AssetMetadata>>;

    /// Reserves for a set of pools
    async fn pools_with_reserves(&self, pool_ids: &[String]) -> Result<Vec<PoolReserves>>;
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PoolSnapshotsData {
    pool: Option<PoolSnapshotsNode>,
}

#[derive(Debug, Deserialize)]
struct PoolSnapshotsNode {
    #[serde(default)]
    snapshots: Vec<SnapshotNode>,
}

#[derive(Debug, Deserialize)]
struct SnapshotNode {
    #[serde(rename = "feesUSD", default)]
    fees_usd: Option<String>,
    #[serde(default)]
    timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct PoolStateData {
    pool: Option<PoolStateNode>,
}

#[derive(Debug, Deserialize)]
struct PoolStateNode {
    #[serde(rename = "tvlUSD", default)]
    tvl_usd: Option<String>,
    #[serde(rename = "reserve0Decimal", default)]
    reserve0_decimal: Option<String>,
    #[serde(rename = "reserve1Decimal", default)]
    reserve1_decimal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssetData {
    asset: Option<AssetNode>,
}

#[derive(Debug, Deserialize)]
struct AssetNode {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    decimals: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct PoolsWithReservesData {
    #[serde(default)]
    pools: Vec<PoolReservesNode>,
}

#[derive(Debug, Deserialize)]
struct PoolReservesNode {
    id: String,
    #[serde(rename = "tvlUSD", default)]
    tvl_usd: Option<String>,
    #[serde(rename = "reserve0Decimal", default)]
    reserve0_decimal: Option<String>,
    #[serde(rename = "reserve1Decimal", default)]
    reserve1_decimal: Option<String>,
}

/// Lenient decimal parse: absent or malformed reads as 0
fn parse_decimal(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse::<f64>().ok()).unwrap_or(0.0)
}

/// HTTP client for the indexer's GraphQL endpoint
pub struct IndexerClient {
    http: Client,
    endpoint: String,
}

impl IndexerClient {
    pub fn new(config: &IndexerConfig) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.url.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute one GraphQL document with variables
    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let request = GraphqlRequest {
            query: document,
            variables,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(INDEXER_REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Indexer request failed: {}", e);
                IndexerError::Unreachable {
                    url: self.endpoint.clone(),
                }
            })?;

        if !response.status().is_success() {
            return Err(IndexerError::ApiError {
                message: format!("status {}", response.status()),
            });
        }

        let envelope: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| IndexerError::ParseError(e.to_string()))?;

        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(IndexerError::ApiError { message });
        }

        envelope
            .data
            .ok_or_else(|| IndexerError::ParseError("response has no data".to_string()))
    }
}

#[async_trait]
impl IndexerApi for IndexerClient {
    async fn pool_snapshots(&self, pool_id: &str, since: i64) -> Result<Vec<PoolSnapshot>> {
        let data: PoolSnapshotsData = self
            .query(
                queries::POOL_SNAPSHOTS_QUERY,
                json!({"poolId": pool_id, "since": since}),
            )
            .await?;

        let snapshots = data
            .pool
            .map(|p| p.snapshots)
            .unwrap_or_default()
            .into_iter()
            .map(|s| PoolSnapshot {
                fees_usd: parse_decimal(s.fees_usd.as_deref()),
                timestamp: s.timestamp,
            })
            .collect();

        Ok(snapshots)
    }

    async fn pool_state(&self, pool_id: &str) -> Result<Option<PoolState>> {
        let data: PoolStateData = self
            .query(queries::POOL_STATE_QUERY, json!({"poolId": pool_id}))
            .await?;

        Ok(data.pool.map(|p| PoolState {
            tvl_usd: parse_decimal(p.tvl_usd.as_deref()),
            reserve0_decimal: parse_decimal(p.reserve0_decimal.as_deref()),
            reserve1_decimal: parse_decimal(p.reserve1_decimal.as_deref()),
        }))
    }

    async fn asset_metadata(&self, asset_id: &AssetId) -> Result<Option<AssetMetadata>> {
        let data: AssetData = self
            .query(queries::ASSET_QUERY, json!({"assetId": asset_id.as_str()}))
            .await?;

        Ok(data.asset.map(|a| AssetMetadata {
            symbol: a.symbol.unwrap_or_default(),
            decimals: a.decimals.unwrap_or(0),
        }))
    }

    async fn pools_with_reserves(&self, pool_ids: &[String]) -> Result<Vec<PoolReserves>> {
        let data: PoolsWithReservesData = self
            .query(
                queries::POOLS_WITH_RESERVES_QUERY,
                json!({"poolIds": pool_ids}),
            )
            .await?;

        Ok(data
            .pools
            .into_iter()
            .map(|p| PoolReserves {
                pool_id: p.id,
                tvl_usd: parse_decimal(p.tvl_usd.as_deref()),
                reserve0_decimal: parse_decimal(p.reserve0_decimal.as_deref()),
                reserve1_decimal: parse_decimal(p.reserve1_decimal.as_deref()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_lenient() {
        assert_eq!(parse_decimal(Some("12.5")), 12.5);
        assert_eq!(parse_decimal(Some("not a number")), 0.0);
        assert_eq!(parse_decimal(Some("")), 0.0);
        assert_eq!(parse_decimal(None), 0.0);
    }

    #[test]
    fn test_envelope_with_errors() {
        let raw = r#"{"data": null, "errors": [{"message": "pool not indexed"}]}"#;
        let envelope: GraphqlResponse<PoolStateData> = serde_json::from_str(raw).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.errors[0].message, "pool not indexed");
    }

    #[test]
    fn test_pool_state_node_parses_string_numbers() {
        let raw = r#"{"pool": {"tvlUSD": "1000000.5", "reserve0Decimal": "250.0", "reserve1Decimal": "0.004"}}"#;
        let data: PoolStateData = serde_json::from_str(raw).unwrap();
        let pool = data.pool.unwrap();
        assert_eq!(parse_decimal(pool.tvl_usd.as_deref()), 1_000_000.5);
        assert_eq!(parse_decimal(pool.reserve1_decimal.as_deref()), 0.004);
    }

    #[test]
    fn test_missing_pool_is_none() {
        let raw = r#"{"pool": null}"#;
        let data: PoolStateData = serde_json::from_str(raw).unwrap();
        assert!(data.pool.is_none());
    }

    #[test]
    fn test_snapshots_default_empty() {
        let raw = r#"{"pool": {}}"#;
        let data: PoolSnapshotsData = serde_json::from_str(raw).unwrap();
        assert!(data.pool.unwrap().snapshots.is_empty());
    }

    #[test]
    fn test_asset_node_partial_metadata() {
        let raw = r#"{"asset": {"symbol": "ETH"}}"#;
        let data: AssetData = serde_json::from_str(raw).unwrap();
        let asset = data.asset.unwrap();
        assert_eq!(asset.symbol.as_deref(), Some("ETH"));
        assert!(asset.decimals.is_none());
    }
}
