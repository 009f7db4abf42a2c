//! Pool query routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use indexer_client::PoolReserves;
use pricing::{AprResult, Derived};

use crate::dto::{ApiError, PoolsReservesRequest};
use crate::AppState;

/// Create pool routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reserves", post(pools_with_reserves))
        .route("/{pool_id}/apr", get(pool_apr))
        .route("/{pool_id}/apr/refresh", post(refresh_pool_apr))
}

fn engine_unavailable() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiError::service_unavailable("Quote service not connected")),
    )
}

/// GET /pools/:pool_id/apr - Annualized fee yield for a pool
pub async fn pool_apr(
    State(state): State<AppState>,
    Path(pool_id): Path<String>,
) -> Result<Json<Derived<AprResult>>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine().await.ok_or_else(engine_unavailable)?;
    Ok(Json(engine.pool_apr(&pool_id).await))
}

/// POST /pools/:pool_id/apr/refresh - Manual refresh for a pool's APR
pub async fn refresh_pool_apr(
    State(state): State<AppState>,
    Path(pool_id): Path<String>,
) -> Result<Json<Derived<AprResult>>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine().await.ok_or_else(engine_unavailable)?;
    engine.invalidate_apr(&pool_id).await;
    Ok(Json(engine.pool_apr(&pool_id).await))
}

/// POST /pools/reserves - Reserves and TVL for a set of pools
pub async fn pools_with_reserves(
    State(state): State<AppState>,
    Json(request): Json<PoolsReservesRequest>,
) -> Result<Json<Derived<Vec<PoolReserves>>>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine().await.ok_or_else(engine_unavailable)?;
    Ok(Json(engine.pools_with_reserves(&request.pool_ids).await))
}
