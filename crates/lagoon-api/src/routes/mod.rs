//! API route handlers

pub mod health;
pub mod pools;
pub mod pricing;
pub mod service;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/service", service::router())
        .nest("/pricing", pricing::router())
        .nest("/pools", pools::router())
        .with_state(state)
}
