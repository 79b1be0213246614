//! HTTP route handlers and router configuration

mod admin;
mod features;

use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the main application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.cors_enabled;

    let mut router = Router::new()
        // Health check
        .route("/health", get(admin::health))
        // Feature streaming
        .route("/features", get(features::features))
        .route("/features/count", get(features::count))
        // Schema introspection pass-through
        .route("/metadata", get(admin::metadata))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}
