//! HTTP routes.

use axum::{routing::get, Router};

/// Create all HTTP routes. The WebSocket endpoint is attached in `main`.
pub fn routes() -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
