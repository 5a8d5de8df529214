//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /`        - Song lookup (cached)
//! - `GET /health`  - Health check: cache backend (not cached)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origin allow-list, `GET` only
//! - **Response cache** - Lookup responses keyed by method and URL
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{OriginPolicy, cache, cors, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes and middleware stack without path normalization.
///
/// The cache sits inside the CORS layer, so a cached body is served with
/// headers computed for the current request's origin.
pub fn router(state: AppState, origin_policy: OriginPolicy) -> Router {
    let lookups = api::routes::lookup_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), cache::layer));

    Router::new()
        .merge(lookups)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors::layer(origin_policy))
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `origin_policy` - which browser origins may read responses
pub fn app_router(state: AppState, origin_policy: OriginPolicy) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, origin_policy))
}
