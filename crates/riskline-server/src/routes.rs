//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `state` - Shared service and price store
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Risk scoring
        .route("/risk/score", post(handlers::score_risk))
        .route("/api/v1/risk/score", post(handlers::score_risk))
        // Prices
        .route("/api/v1/symbols", get(handlers::list_symbols))
        .route("/api/v1/prices/{symbol}", get(handlers::get_prices))
        .with_state(state)
}
