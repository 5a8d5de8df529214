//! API route configuration.

use crate::api::handlers::links_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Lookup routes. Responses from these routes are eligible for caching.
///
/// # Endpoints
///
/// - `GET /?url=<share url>&country=<code>` - Normalized song data
pub fn lookup_routes() -> Router<AppState> {
    Router::new().route("/", get(links_handler))
}
