//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/market-data", get(handlers::market_data))
        .route("/optimize", post(handlers::optimize))
        .route("/portfolio/{session_id}", get(handlers::get_portfolio))
        .route("/simulate", post(handlers::simulate))
        .route("/protocols", get(handlers::list_protocols));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
