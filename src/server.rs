//! HTTP router: routes, CORS and request tracing.

use crate::search::handlers::{handle_health, handle_search, SharedBackend};

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const ENDPOINT_SEARCH: &str = "/search";
pub const ENDPOINT_HEALTH: &str = "/health";

pub fn build_router(backend: SharedBackend, cors_origins: Option<&str>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, get(handle_search))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(backend))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// GET-only CORS. Without an explicit origin list any origin is allowed.
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let origins: Vec<HeaderValue> = origins
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
