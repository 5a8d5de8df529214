//! Trait for the third-party song matching API.

use async_trait::async_trait;

use crate::domain::entities::{UpstreamQuery, UpstreamResponse};
use crate::error::AppError;

/// Client for the song.link matching API.
///
/// # Implementations
///
/// - [`crate::infrastructure::songlink::HttpSongLinkClient`] - reqwest-backed client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongLinkClient: Send + Sync {
    /// Resolves a share URL into the matching API's full response.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] with the upstream status code and status
    /// text if the API answers with a non-success status.
    ///
    /// Returns [`AppError::Internal`] if the API cannot be reached or its body
    /// cannot be parsed.
    async fn fetch_links(&self, query: &UpstreamQuery) -> Result<UpstreamResponse, AppError>;
}
