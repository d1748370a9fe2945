//! PostgreSQL implementation of the settings repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::PatternSettings;
use crate::domain::repositories::SettingsRepository;
use crate::error::AppError;

/// Single-row settings table (`linky_settings`, `id = 1`).
pub struct PgSettingsRepository {
    pool: Arc<PgPool>,
}

impl PgSettingsRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    internal_patterns: String,
    version: i64,
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for PatternSettings {
    fn from(row: SettingsRow) -> Self {
        PatternSettings::new(row.internal_patterns, row.version, Some(row.updated_at))
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn get_pattern_settings(&self) -> Result<PatternSettings, AppError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT internal_patterns, version, updated_at FROM linky_settings WHERE id = 1",
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into).unwrap_or_default())
    }

    async fn save_internal_patterns(&self, raw: &str) -> Result<PatternSettings, AppError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO linky_settings (id, internal_patterns, version, updated_at)
            VALUES (1, $1, 1, now())
            ON CONFLICT (id) DO UPDATE
            SET internal_patterns = EXCLUDED.internal_patterns,
                version = linky_settings.version + 1,
                updated_at = now()
            RETURNING internal_patterns, version, updated_at
            "#,
        )
        .bind(raw)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }
}
