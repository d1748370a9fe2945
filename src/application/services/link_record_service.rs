//! Link record lookup, deduplication and creation.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::domain::entities::{LinkRecord, MAX_URI_LENGTH, NewLinkRecord};
use crate::domain::repositories::LinkRecordRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Failure of [`LinkRecordService::resolve_or_create`], split by stage.
///
/// A lookup failure means storage is unavailable and the caller must abort.
/// A creation failure only concerns the uri at hand.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Link record lookup failed: {0}")]
    Lookup(AppError),
    #[error("Link record creation failed: {0}")]
    Creation(AppError),
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Lookup(e) | ResolveError::Creation(e) => e,
        }
    }
}

/// Service owning the one-record-per-uri contract.
///
/// Lookups go through a uri → id cache first. Cached ids are verified by
/// loading the record, so a stale entry costs one extra query and is then
/// dropped.
pub struct LinkRecordService<R: LinkRecordRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Option<u64>,
}

impl<R: LinkRecordRepository + ?Sized> LinkRecordService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            repository,
            cache,
            cache_ttl: None,
        }
    }

    /// Overrides the cache TTL used for uri → id entries.
    pub fn with_cache_ttl(mut self, ttl_seconds: u64) -> Self {
        self.cache_ttl = Some(ttl_seconds);
        self
    }

    /// Loads a record by id, bypassing the uri lookup.
    pub async fn load(&self, id: i64) -> Result<Option<LinkRecord>, AppError> {
        self.repository.load(id).await
    }

    /// Loads a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    pub async fn get(&self, id: i64) -> Result<LinkRecord, AppError> {
        self.repository
            .load(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link record not found", json!({ "id": id })))
    }

    /// Finds the record for an exact uri.
    pub async fn find_by_uri(&self, uri: &str) -> Result<Option<LinkRecord>, AppError> {
        if let Ok(Some(id)) = self.cache.get_record_id(uri).await {
            match self.repository.load(id).await? {
                Some(record) if record.uri == uri => return Ok(Some(record)),
                _ => {
                    debug!(uri, id, "Dropping stale cached link record id");
                    let _ = self.cache.invalidate(uri).await;
                }
            }
        }

        let record = self.repository.find_by_uri(uri).await?;
        if let Some(record) = &record {
            self.remember(record).await;
        }

        Ok(record)
    }

    /// Creates a record for `uri`.
    ///
    /// An empty `title` falls back to the uri and titles are truncated to
    /// 255 characters. If another writer inserted the same uri first, that
    /// record is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `uri` is longer than 2048 characters.
    pub async fn create(&self, uri: &str, title: &str) -> Result<LinkRecord, AppError> {
        let new_record = NewLinkRecord::prepare(uri, title).ok_or_else(|| {
            AppError::bad_request(
                "URL is too long",
                json!({ "max_length": MAX_URI_LENGTH, "length": uri.chars().count() }),
            )
        })?;

        let record = match self.repository.create(new_record).await {
            Ok(record) => record,
            Err(e @ AppError::Conflict { .. }) => {
                debug!(uri, "Link record created concurrently, reusing it");
                self.repository.find_by_uri(uri).await?.ok_or(e)?
            }
            Err(e) => return Err(e),
        };

        self.remember(&record).await;
        Ok(record)
    }

    /// Returns the existing record for `uri` or creates one.
    ///
    /// Existing records are returned unchanged, whatever `title` is.
    pub async fn resolve_or_create(
        &self,
        uri: &str,
        title: &str,
    ) -> Result<LinkRecord, ResolveError> {
        if let Some(record) = self.find_by_uri(uri).await.map_err(ResolveError::Lookup)? {
            return Ok(record);
        }

        self.create(uri, title).await.map_err(ResolveError::Creation)
    }

    /// Lists records, newest first.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<LinkRecord>, AppError> {
        self.repository.list(offset, limit).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    async fn remember(&self, record: &LinkRecord) {
        let _ = self
            .cache
            .set_record_id(&record.uri, record.id, self.cache_ttl)
            .await;
    }
}
