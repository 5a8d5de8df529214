//! Response cache middleware for lookup routes.
//!
//! `GET` responses are cached by method and request URL. Only `200 OK`
//! responses are stored. Cache backend failures are logged and treated as
//! misses.

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::infrastructure::cache::CachedResponse;
use crate::state::AppState;

/// Response header reporting whether the cache answered.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Serves cached responses and stores fresh `200 OK` ones.
///
/// # Flow
///
/// 1. Non-`GET` requests pass through untouched
/// 2. Hit: replay the stored response with `x-cache: HIT`; the handler is not called
/// 3. Miss: run the handler, store a `200 OK` body, reply with `x-cache: MISS`
///
/// # Example
///
/// ```rust,ignore
/// let lookups = Router::new()
///     .route("/", get(links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), cache::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = cache_key(&req);

    match st.cache.get(&key).await {
        Ok(Some(cached)) => {
            if let Some(response) = replay(cached) {
                debug!("Cache HIT for {}", key);
                return response;
            }
            warn!("Ignoring unusable cache entry for {}", key);
        }
        Ok(None) => debug!("Cache MISS for {}", key),
        Err(e) => warn!("Cache error for {}: {}", key, e),
    }

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to buffer response body for {}: {}", key, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            let entry = CachedResponse {
                status: parts.status.as_u16(),
                content_type: parts
                    .headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: text.to_string(),
            };

            if let Err(e) = st.cache.set(&key, &entry, None).await {
                warn!("Failed to cache response for {}: {}", key, e);
            }
        }
        Err(_) => debug!("Not caching non-UTF-8 body for {}", key),
    }

    parts
        .headers
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

/// Builds the cache key from the request method and URL.
pub fn cache_key(req: &Request) -> String {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!("{} {}", req.method(), target)
}

fn replay(cached: CachedResponse) -> Option<Response> {
    let status = StatusCode::from_u16(cached.status).ok()?;

    let mut builder = Response::builder()
        .status(status)
        .header(CACHE_STATUS_HEADER, "HIT");
    if let Some(content_type) = cached.content_type.as_deref() {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    builder.body(Body::from(cached.body)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::links_handler;
    use crate::application::services::LinkService;
    use crate::domain::entities::UpstreamResponse;
    use crate::domain::upstream::MockSongLinkClient;
    use crate::infrastructure::cache::{CacheError, MockCacheService};
    use axum::{Router, middleware, routing::get as get_route};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn get(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_cache_key_includes_query() {
        assert_eq!(
            cache_key(&get("/?url=https%3A%2F%2Fyoutu.be%2Fx&country=JP")),
            "GET /?url=https%3A%2F%2Fyoutu.be%2Fx&country=JP"
        );
    }

    #[test]
    fn test_cache_key_distinguishes_country() {
        assert_ne!(
            cache_key(&get("/?url=a&country=JP")),
            cache_key(&get("/?url=a&country=US"))
        );
    }

    #[test]
    fn test_replay_restores_response() {
        let response = replay(CachedResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: r#"{"url":"https://song.link/abc"}"#.to_string(),
        })
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[CACHE_STATUS_HEADER], "HIT");
    }

    #[test]
    fn test_replay_rejects_invalid_status() {
        let cached = CachedResponse {
            status: 42,
            content_type: None,
            body: String::new(),
        };
        assert!(replay(cached).is_none());
    }

    #[tokio::test]
    async fn test_cache_error_falls_through_to_handler() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .times(1)
            .returning(|_| Err(CacheError::ConnectionError("connection refused".to_string())));
        cache.expect_set().times(1).returning(|_, _, _| Ok(()));

        let mut client = MockSongLinkClient::new();
        client.expect_fetch_links().times(1).returning(|_| {
            Ok(UpstreamResponse {
                entity_unique_id: "X".to_string(),
                page_url: "https://song.link/abc".to_string(),
                entities_by_unique_id: Default::default(),
            })
        });

        let state = AppState::new(Arc::new(LinkService::new(Arc::new(client))), Arc::new(cache));
        let app = Router::new()
            .route("/", get_route(links_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), layer))
            .with_state(state);

        let response = app.oneshot(get("/?url=a")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_STATUS_HEADER], "MISS");
    }
}
