//! amm-quote-client: Adapter over the external AMM quote service
//!
//! Wraps the quote service's HTTP API behind the [`QuoteClient`] trait.
//! Pure pass-through: every call maps to one request, no caching and no
//! retries. Timeouts are handled here; callers treat a timeout as the
//! service being unavailable.

use std::time::Duration;

use async_trait::async_trait;
use lagoon_core::{AmmConfig, AssetId, PoolId, QuoteError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default timeout for quote service calls (10 seconds)
const QUOTE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Result type for quote client operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// A simulated exact-input swap result.
///
/// Ephemeral: lives for one query cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapPreview {
    /// Output amount in the buy asset's smallest unit
    pub output_amount: u128,
    /// Price implied by the simulated trade
    pub price: f64,
}

/// Boundary to the external AMM client.
///
/// Implementations must not be called with `amount_in == 0`; the pricing
/// engine short-circuits zero amounts before reaching the adapter.
#[async_trait]
pub trait QuoteClient: Send + Sync {
    /// Simulate an exact-input swap of `amount_in` (smallest units of
    /// `asset_in`) along the given non-empty pool route.
    async fn preview_swap_exact_input(
        &self,
        asset_in: &AssetId,
        amount_in: u128,
        route: &[PoolId],
    ) -> Result<SwapPreview>;

    /// Liveness probe for the quote service
    async fn is_available(&self) -> bool;
}

#[derive(Debug, Serialize)]
struct PreviewRequest<'a> {
    asset_in: &'a str,
    /// u128 amounts cross the wire as decimal strings
    amount_in: String,
    route: Vec<RoutePool<'a>>,
}

#[derive(Debug, Serialize)]
struct RoutePool<'a> {
    asset_a: &'a str,
    asset_b: &'a str,
    stable: bool,
}

#[derive(Debug, Deserialize)]
struct PreviewResponse {
    output_amount: String,
    price: f64,
}

/// HTTP client for the AMM quote service
pub struct AmmClient {
    http: Client,
    base_url: String,
}

impl AmmClient {
    pub fn new(config: &AmmConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QuoteClient for AmmClient {
    async fn preview_swap_exact_input(
        &self,
        asset_in: &AssetId,
        amount_in: u128,
        route: &[PoolId],
    ) -> Result<SwapPreview> {
        let url = format!("{}/preview/exact-input", self.base_url);
        let request = PreviewRequest {
            asset_in: asset_in.as_str(),
            amount_in: amount_in.to_string(),
            route: route
                .iter()
                .map(|pool| RoutePool {
                    asset_a: pool.asset_a.as_str(),
                    asset_b: pool.asset_b.as_str(),
                    stable: pool.stable,
                })
                .collect(),
        };

        let response = self
            .http
            .post(&url)
            .timeout(QUOTE_REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Quote service request failed: {}", e);
                QuoteError::Unreachable {
                    url: self.base_url.clone(),
                }
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(QuoteError::NoLiquidity),
            status if !status.is_success() => {
                return Err(QuoteError::ApiError {
                    message: format!("status {}", status),
                });
            }
            _ => {}
        }

        let preview: PreviewResponse = response
            .json()
            .await
            .map_err(|e| QuoteError::ParseError(e.to_string()))?;

        let output_amount = preview
            .output_amount
            .parse::<u128>()
            .map_err(|e| QuoteError::ParseError(format!("output_amount: {}", e)))?;

        Ok(SwapPreview {
            output_amount,
            price: preview.price,
        })
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self
            .http
            .get(&url)
            .timeout(QUOTE_REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Quote service is not available: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lagoon_core::AssetId;

    #[test]
    fn test_preview_request_wire_shape() {
        let pool = PoolId::canonical(AssetId::new("0x02"), AssetId::new("0x01"), true);
        let request = PreviewRequest {
            asset_in: "0x01",
            amount_in: "340282366920938463463374607431768211455".to_string(),
            route: vec![RoutePool {
                asset_a: pool.asset_a.as_str(),
                asset_b: pool.asset_b.as_str(),
                stable: pool.stable,
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["asset_in"], "0x01");
        // u128::MAX survives as a string
        assert_eq!(
            json["amount_in"],
            "340282366920938463463374607431768211455"
        );
        assert_eq!(json["route"][0]["asset_a"], "0x01");
        assert_eq!(json["route"][0]["stable"], true);
    }

    #[test]
    fn test_preview_response_parses_string_amount() {
        let raw = r#"{"output_amount": "123456789", "price": 0.25}"#;
        let parsed: PreviewResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.output_amount.parse::<u128>().unwrap(), 123_456_789);
        assert_eq!(parsed.price, 0.25);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AmmClient::new(&AmmConfig {
            url: "http://localhost:8080/".to_string(),
        });
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
