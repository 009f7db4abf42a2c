//! Engine state types
//!
//! Derivation results and cache keys.

use lagoon_core::{AssetId, AssetReference, PoolId};
use serde::{Deserialize, Serialize};

/// The shape every derivation reports to callers. No other shape is
/// guaranteed across the presentation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derived<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    #[serde(rename = "isLoading")]
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Derived<T> {
    /// Nothing to show and nothing in flight: gating failed or inputs are
    /// incomplete. This is a defined empty result, not an error.
    pub fn idle() -> Self {
        Self {
            value: None,
            is_loading: false,
            error: None,
        }
    }

    /// A fetch is in flight; `value` carries the stale value if one is
    /// still servable.
    pub fn loading(value: Option<T>) -> Self {
        Self {
            value,
            is_loading: true,
            error: None,
        }
    }

    pub fn ready(value: T) -> Self {
        Self {
            value: Some(value),
            is_loading: false,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            value: None,
            is_loading: false,
            error: Some(error.into()),
        }
    }
}

/// Inputs for the reserves-price derivation. Optional fields model the
/// form state directly so the fetch gate is checkable on the raw inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservesPriceRequest {
    pub sell: Option<AssetReference>,
    pub buy: Option<AssetReference>,
    #[serde(default)]
    pub route: Vec<PoolId>,
}

/// Cache key for the reserves-price derivation: (sell, buy, route-set).
/// The route is sorted so that key equality is order-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReservesPriceKey {
    sell: AssetId,
    buy: AssetId,
    route: Vec<PoolId>,
}

impl ReservesPriceKey {
    pub fn new(sell: &AssetId, buy: &AssetId, route: &[PoolId]) -> Self {
        let mut route = route.to_vec();
        route.sort();
        Self {
            sell: sell.clone(),
            buy: buy.clone(),
            route,
        }
    }
}

/// Annualized fee yield for a pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AprResult {
    /// Percent, annualized from the trailing 24-hour fee revenue
    pub apr: f64,
    #[serde(rename = "tvlUSD")]
    pub tvl_usd: f64,
    pub reserve0: f64,
    pub reserve1: f64,
}
