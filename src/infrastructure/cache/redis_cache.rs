//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for uri → link record id lookups.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// All operations are fail-open: errors are logged but don't propagate to callers.
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
    /// - `default_ttl_seconds` - TTL applied when [`CacheService::set_record_id`]
    ///   is called with `ttl_seconds = None`; controlled via `CACHE_TTL_SECONDS` env var
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
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

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "linky:uri:".to_string(),
        })
    }

    fn build_key(&self, uri: &str) -> String {
        format!("{}{}", self.key_prefix, uri)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_record_id(&self, uri: &str) -> CacheResult<Option<i64>> {
        let key = self.build_key(uri);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<i64>>(&key).await {
            Ok(Some(id)) => {
                debug!(uri, id, "Cache HIT");
                Ok(Some(id))
            }
            Ok(None) => {
                debug!(uri, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(uri, error = %e, "Redis GET error");
                Ok(None)
            }
        }
    }

    async fn set_record_id(&self, uri: &str, id: i64, ttl: Option<u64>) -> CacheResult<()> {
        let key = self.build_key(uri);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);

        match conn.set_ex::<_, _, ()>(&key, id, ttl_seconds).await {
            Ok(_) => {
                debug!(uri, id, ttl_seconds, "Cache SET");
                Ok(())
            }
            Err(e) => {
                warn!(uri, error = %e, "Redis SET error");
                Ok(())
            }
        }
    }

    async fn invalidate(&self, uri: &str) -> CacheResult<()> {
        let key = self.build_key(uri);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!(uri, "Cache INVALIDATE");
                }
                Ok(())
            }
            Err(e) => {
                warn!(uri, error = %e, "Redis DEL error");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
