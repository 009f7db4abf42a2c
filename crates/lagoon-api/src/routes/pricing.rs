//! Pricing derivation routes
//!
//! Every derivation answers in the `{value, isLoading, error}` shape.
//! Routes that reach the quote adapter answer 503 until the engine's
//! availability gate has passed.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use lagoon_core::AssetMetadata;
use pricing::{Derived, ReservesPriceRequest};

use crate::dto::{
    preview_to_dto, AddLiquidityRequest, ApiError, ExchangeRateRequest, PreviewRequest,
    PriceImpactRequest, PriceImpactResponse, SwapPreviewDto,
};
use crate::AppState;

/// Create pricing routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/exchange-rate", post(exchange_rate))
        .route("/price-impact", post(price_impact))
        .route("/reserves-price", post(reserves_price))
        .route("/reserves-price/refresh", post(refresh_reserves_price))
        .route("/preview", post(preview))
        .route("/add-liquidity", post(add_liquidity))
}

fn engine_unavailable() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiError::service_unavailable("Quote service not connected")),
    )
}

/// POST /pricing/exchange-rate - Rate line for the swap form
pub async fn exchange_rate(
    State(state): State<AppState>,
    Json(request): Json<ExchangeRateRequest>,
) -> Result<Json<Derived<String>>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine().await.ok_or_else(engine_unavailable)?;

    let sell_meta = match &request.swap_state.sell.asset_id {
        Some(id) => engine.resolve_asset(id).await.metadata,
        None => AssetMetadata::default(),
    };
    let buy_meta = match &request.swap_state.buy.asset_id {
        Some(id) => engine.resolve_asset(id).await.metadata,
        None => AssetMetadata::default(),
    };

    let rate = pricing::exchange_rate(&request.swap_state, request.mode, &sell_meta, &buy_meta);
    // "No rate" is a defined empty result the UI hides, not an error
    Ok(Json(match rate {
        Some(rate) => Derived::ready(rate),
        None => Derived::idle(),
    }))
}

/// POST /pricing/price-impact - Impact figure plus severity band
pub async fn price_impact(Json(request): Json<PriceImpactRequest>) -> Json<PriceImpactResponse> {
    let impact = pricing::price_impact(request.reserves_price, request.preview_price);
    Json(PriceImpactResponse {
        impact,
        severity: pricing::impact_severity(impact),
    })
}

/// POST /pricing/reserves-price - Cached pool-implied price
pub async fn reserves_price(
    State(state): State<AppState>,
    Json(request): Json<ReservesPriceRequest>,
) -> Result<Json<Derived<f64>>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine().await.ok_or_else(engine_unavailable)?;
    Ok(Json(engine.reserves_price(&request).await))
}

/// POST /pricing/reserves-price/refresh - Manual refresh for a key
pub async fn refresh_reserves_price(
    State(state): State<AppState>,
    Json(request): Json<ReservesPriceRequest>,
) -> Result<Json<Derived<f64>>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine().await.ok_or_else(engine_unavailable)?;
    engine.invalidate_reserves_price(&request).await;
    Ok(Json(engine.reserves_price(&request).await))
}

/// POST /pricing/preview - Exact-input swap preview
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<Derived<SwapPreviewDto>>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine().await.ok_or_else(engine_unavailable)?;

    // Malformed amounts read as zero and short-circuit to the idle state
    let amount_in = request.amount_in.trim().parse::<u128>().unwrap_or(0);
    let derived = engine
        .exact_input_preview(&request.asset_in, amount_in, &request.route)
        .await;
    Ok(Json(preview_to_dto(derived)))
}

/// POST /pricing/add-liquidity - Counterpart amount preview
pub async fn add_liquidity(
    State(state): State<AppState>,
    Json(request): Json<AddLiquidityRequest>,
) -> Result<Json<Derived<f64>>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine().await.ok_or_else(engine_unavailable)?;
    Ok(Json(
        engine
            .add_liquidity_preview(&request.pool_id, request.amount, request.input_is_reserve0)
            .await,
    ))
}
