//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, CacheService, CachedResponse};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every lookup
/// is a miss, so every request reaches the matching API.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<CachedResponse>> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &str,
        _response: &CachedResponse,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_never_hits() {
        let cache = NullCache::new();
        let response = CachedResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: "{}".to_string(),
        };

        cache.set("GET /?url=x", &response, Some(60)).await.unwrap();

        assert!(cache.get("GET /?url=x").await.unwrap().is_none());
        assert!(cache.health_check().await);
    }
}
