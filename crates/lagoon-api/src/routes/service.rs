//! Service status and configuration endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use lagoon_core::AppConfig;

use crate::dto::StatusResponse;
use crate::AppState;

/// Create service routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/configure", post(configure))
}

/// GET /service/status - Connection gate for the UI
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = state.config().await;

    let quote_service_available = match state.engine().await {
        Some(engine) => engine.quote_available().await,
        None => false,
    };

    Json(StatusResponse {
        quote_service_available,
        amm_url: config.amm.url,
        indexer_url: config.indexer.url,
    })
}

/// POST /service/configure - Update endpoints and rebuild the engine
pub async fn configure(
    State(state): State<AppState>,
    Json(config): Json<AppConfig>,
) -> Json<StatusResponse> {
    state.set_config(config).await;
    get_status(State(state)).await
}
