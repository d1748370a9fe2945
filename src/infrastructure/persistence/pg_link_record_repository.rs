//! PostgreSQL implementation of the link record repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::domain::repositories::LinkRecordRepository;
use crate::error::AppError;

/// PostgreSQL repository for link records.
///
/// The `link_records` table carries a unique index on `md5(uri)`, so a
/// concurrent insert of the same uri fails with [`AppError::Conflict`].
pub struct PgLinkRecordRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRecordRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRecordRow {
    id: i64,
    uri: String,
    title: String,
    created_at: DateTime<Utc>,
}

impl From<LinkRecordRow> for LinkRecord {
    fn from(row: LinkRecordRow) -> Self {
        LinkRecord::new(row.id, row.uri, row.title, row.created_at)
    }
}

#[async_trait]
impl LinkRecordRepository for PgLinkRecordRepository {
    async fn create(&self, new_record: NewLinkRecord) -> Result<LinkRecord, AppError> {
        let row = sqlx::query_as::<_, LinkRecordRow>(
            r#"
            INSERT INTO link_records (uri, title)
            VALUES ($1, $2)
            RETURNING id, uri, title, created_at
            "#,
        )
        .bind(&new_record.uri)
        .bind(&new_record.title)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn load(&self, id: i64) -> Result<Option<LinkRecord>, AppError> {
        let row = sqlx::query_as::<_, LinkRecordRow>(
            "SELECT id, uri, title, created_at FROM link_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_uri(&self, uri: &str) -> Result<Option<LinkRecord>, AppError> {
        // The md5 predicate lets the planner use the unique index.
        let row = sqlx::query_as::<_, LinkRecordRow>(
            r#"
            SELECT id, uri, title, created_at
            FROM link_records
            WHERE md5(uri) = md5($1) AND uri = $1
            "#,
        )
        .bind(uri)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<LinkRecord>, AppError> {
        let rows = sqlx::query_as::<_, LinkRecordRow>(
            r#"
            SELECT id, uri, title, created_at
            FROM link_records
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_records")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
