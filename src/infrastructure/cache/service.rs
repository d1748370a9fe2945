//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching the uri → link record id mapping.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application (cache failures degrade to repository lookups).
/// Cached ids are hints: a caller that loads a cached id and finds no record
/// must invalidate the entry and fall back to the repository.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the link record id cached for an exact uri.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(id))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_record_id(&self, uri: &str) -> CacheResult<Option<i64>>;

    /// Stores a uri → id mapping with optional TTL.
    ///
    /// `ttl_seconds` of `None` uses the implementation default.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations should log errors
    /// and return `Ok(())` to avoid disrupting the request flow.
    async fn set_record_id(&self, uri: &str, id: i64, ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Removes a cached mapping.
    async fn invalidate(&self, uri: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}
