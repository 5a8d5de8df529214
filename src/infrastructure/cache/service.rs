//! Cache service trait and error types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A stored HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Trait for caching whole HTTP responses by request key.
///
/// Implementations must be thread-safe. Cache failures should degrade to a
/// miss rather than fail the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached response.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(response))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>>;

    /// Stores a response with optional TTL.
    ///
    /// # Arguments
    ///
    /// - `key` - Request key (method and URL)
    /// - `response` - The response to cache
    /// - `ttl_seconds` - Optional TTL in seconds (implementation-specific default if None)
    async fn set(
        &self,
        key: &str,
        response: &CachedResponse,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;

    /// Human-readable backend name for health reports.
    fn backend(&self) -> &'static str;
}
