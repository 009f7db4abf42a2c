//! Data Transfer Objects for API requests and responses

use amm_quote_client::SwapPreview;
use lagoon_core::{AssetId, PoolId, Side, SwapState};
use pricing::{Derived, ImpactSeverity};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Service status response: the UI's connection gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the AMM quote service answered its health probe
    pub quote_service_available: bool,
    pub amm_url: String,
    pub indexer_url: String,
}

/// Exchange rate request: the swap form state plus which side is priced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateRequest {
    pub swap_state: SwapState,
    pub mode: Side,
}

/// Price impact request: the two prices the UI currently holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceImpactRequest {
    pub reserves_price: Option<f64>,
    pub preview_price: Option<f64>,
}

/// Price impact with its severity band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceImpactResponse {
    pub impact: f64,
    pub severity: ImpactSeverity,
}

/// Exact-input preview request. The amount is raw units as a decimal
/// string; zero or malformed amounts resolve to the idle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub asset_in: AssetId,
    #[serde(default)]
    pub amount_in: String,
    #[serde(default)]
    pub route: Vec<PoolId>,
}

/// Swap preview on the wire: u128 amounts cross as decimal strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapPreviewDto {
    pub output_amount: String,
    pub price: f64,
}

impl From<SwapPreview> for SwapPreviewDto {
    fn from(preview: SwapPreview) -> Self {
        Self {
            output_amount: preview.output_amount.to_string(),
            price: preview.price,
        }
    }
}

/// Map a derived preview into its wire shape
pub fn preview_to_dto(derived: Derived<SwapPreview>) -> Derived<SwapPreviewDto> {
    Derived {
        value: derived.value.map(Into::into),
        is_loading: derived.is_loading,
        error: derived.error,
    }
}

/// Add-liquidity preview request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLiquidityRequest {
    pub pool_id: String,
    pub amount: f64,
    /// Which reserve the typed amount belongs to
    #[serde(default)]
    pub input_is_reserve0: bool,
}

/// Pool list request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolsReservesRequest {
    #[serde(default)]
    pub pool_ids: Vec<String>,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new("service_unavailable", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}
