//! Origin allow-list for browser clients.
//!
//! Only `GET` is allowed cross-origin. Requests from origins outside the
//! policy receive no `Access-Control-Allow-Origin` header, so browsers
//! refuse to expose the response.

use axum::http::{HeaderValue, Method, request::Parts};
use regex::Regex;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Default pattern for deployed frontends.
pub const DEFAULT_ORIGIN_PATTERN: &str = r"^https://nostatus.*\.vercel\.app$";

/// Decides which `Origin` values may read responses.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    pattern: Regex,
    allow_localhost: bool,
}

impl OriginPolicy {
    /// Builds a policy from a regex over the full origin string.
    ///
    /// When `allow_localhost` is set, any origin containing `localhost:` is
    /// also accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regex.
    pub fn new(pattern: &str, allow_localhost: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            allow_localhost,
        })
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.pattern.is_match(origin) || (self.allow_localhost && origin.contains("localhost:"))
    }
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_ORIGIN_PATTERN).expect("default origin pattern is valid"),
            allow_localhost: true,
        }
    }
}

/// Creates the CORS layer enforcing `policy`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(links_handler))
///     .layer(cors::layer(OriginPolicy::default()));
/// ```
pub fn layer(policy: OriginPolicy) -> CorsLayer {
    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
        origin.to_str().is_ok_and(|o| policy.allows(o))
    });

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
}
