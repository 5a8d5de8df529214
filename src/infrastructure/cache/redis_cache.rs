//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService, CachedResponse};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for normalized lookup responses.
///
/// Uses `ConnectionManager` for connection reuse. Entries are stored as JSON
/// under a namespaced key. Read and write errors are logged and reported as
/// misses / no-ops.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when [`CacheService::set`] is called with
    ///   `ttl_seconds = None`; controlled via `CACHE_TTL_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "songlink:".to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let raw = match conn.get::<_, Option<String>>(&redis_key).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                return Ok(None);
            }
        };

        let Some(raw) = raw else {
            debug!("Cache MISS: {}", key);
            return Ok(None);
        };

        match serde_json::from_str::<CachedResponse>(&raw) {
            Ok(response) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(response))
            }
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set(
        &self,
        key: &str,
        response: &CachedResponse,
        ttl: Option<u64>,
    ) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);

        let payload = serde_json::to_string(response)
            .map_err(|e| CacheError::OperationError(e.to_string()))?;

        match conn
            .set_ex::<_, _, ()>(&redis_key, payload, ttl_seconds)
            .await
        {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
