//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;
use crate::config::Settings;

/// Create the main router with all routes.
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    let router = Router::new()
        // Liveness / readiness probe
        .route("/health", get(handlers::health))
        // Web API skill called by the search indexer
        .route("/api/enrich_snippet", post(handlers::enrich_snippet))
        .layer(DefaultBodyLimit::max(settings.body_limit))
        .with_state(state);

    if settings.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
