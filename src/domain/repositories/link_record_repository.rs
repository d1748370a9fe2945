//! Repository trait for link record data access.

use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for link records.
///
/// Records are only ever created and read through this interface; updating
/// and deleting them is outside the link replacer's concern.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRecordRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link_record.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRecordRepository: Send + Sync {
    /// Persists a new link record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a record with the same uri already
    /// exists and the backend enforces uniqueness.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_record: NewLinkRecord) -> Result<LinkRecord, AppError>;

    /// Loads a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn load(&self, id: i64) -> Result<Option<LinkRecord>, AppError>;

    /// Finds the record whose uri equals `uri` exactly.
    ///
    /// No normalization is applied: `http://a.com` and `http://a.com/` are
    /// different uris.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_uri(&self, uri: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Lists records ordered by id, newest first.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<LinkRecord>, AppError>;

    /// Counts all records.
    async fn count(&self) -> Result<i64, AppError>;
}
