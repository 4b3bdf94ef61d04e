//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Main routes
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        // API routes
        .route("/autocomplete", get(handlers::autocomplete))
        .route("/cities", get(handlers::cities))
        .route("/skeleton", get(handlers::skeleton))
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        // Static routes
        .route("/robots.txt", get(handlers::robots_txt))
        .route("/favicon.ico", get(handlers::favicon))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Add state
        .with_state(state)
}
