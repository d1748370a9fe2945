#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use chrono::Utc;
use linky_replacer::api::handlers::health_handler;
use linky_replacer::api::routes::api_routes;
use linky_replacer::domain::entities::{LinkRecord, NewLinkRecord, PatternSettings};
use linky_replacer::domain::href::CanonicalPath;
use linky_replacer::domain::repositories::{LinkRecordRepository, SettingsRepository};
use linky_replacer::error::AppError;
use linky_replacer::infrastructure::cache::NullCache;
use linky_replacer::state::AppState;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Link records kept in memory. Ids start at 1 and uris are unique.
#[derive(Default)]
pub struct InMemoryLinkRecords {
    records: Mutex<Vec<LinkRecord>>,
}

impl InMemoryLinkRecords {
    pub fn all(&self) -> Vec<LinkRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn insert(&self, uri: &str, title: &str) -> LinkRecord {
        let mut records = self.records.lock().unwrap();
        let record = LinkRecord::new(
            records.len() as i64 + 1,
            uri.to_string(),
            title.to_string(),
            Utc::now(),
        );
        records.push(record.clone());
        record
    }
}

#[async_trait]
impl LinkRecordRepository for InMemoryLinkRecords {
    async fn create(&self, new_record: NewLinkRecord) -> Result<LinkRecord, AppError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.uri == new_record.uri) {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        let record = LinkRecord::new(
            records.len() as i64 + 1,
            new_record.uri,
            new_record.title,
            Utc::now(),
        );
        records.push(record.clone());
        Ok(record)
    }

    async fn load(&self, id: i64) -> Result<Option<LinkRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_uri(&self, uri: &str) -> Result<Option<LinkRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.uri == uri).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<LinkRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.lock().unwrap().len() as i64)
    }
}

/// Settings kept in memory, starting empty at version 0.
#[derive(Default)]
pub struct InMemorySettings {
    settings: Mutex<PatternSettings>,
}

impl InMemorySettings {
    pub fn with_patterns(raw: &str) -> Self {
        Self {
            settings: Mutex::new(PatternSettings::new(raw.to_string(), 1, Some(Utc::now()))),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettings {
    async fn get_pattern_settings(&self) -> Result<PatternSettings, AppError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save_internal_patterns(&self, raw: &str) -> Result<PatternSettings, AppError> {
        let mut settings = self.settings.lock().unwrap();
        *settings = PatternSettings::new(raw.to_string(), settings.version + 1, Some(Utc::now()));
        Ok(settings.clone())
    }
}

/// A link record store whose every call fails, as when the database is down.
pub struct UnavailableLinkRecords;

#[async_trait]
impl LinkRecordRepository for UnavailableLinkRecords {
    async fn create(&self, _new_record: NewLinkRecord) -> Result<LinkRecord, AppError> {
        Err(unavailable())
    }

    async fn load(&self, _id: i64) -> Result<Option<LinkRecord>, AppError> {
        Err(unavailable())
    }

    async fn find_by_uri(&self, _uri: &str) -> Result<Option<LinkRecord>, AppError> {
        Err(unavailable())
    }

    async fn list(&self, _offset: i64, _limit: i64) -> Result<Vec<LinkRecord>, AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::internal("Database error", json!({}))
}

pub fn create_test_state(
    link_records: Arc<dyn LinkRecordRepository>,
    settings: Arc<dyn SettingsRepository>,
) -> AppState {
    AppState::new(
        link_records,
        settings,
        Arc::new(NullCache::new()),
        CanonicalPath::default(),
        3600,
    )
}

/// The application routes without middleware.
pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}
