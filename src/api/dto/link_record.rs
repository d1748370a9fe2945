//! DTOs for link record listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkRecord;

/// Paginated list of link records.
#[derive(Debug, Serialize)]
pub struct LinkRecordListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkRecordItem>,
}

/// A link record as exposed over the API.
#[derive(Debug, Serialize)]
pub struct LinkRecordItem {
    pub id: i64,
    pub uri: String,
    pub title: String,
    pub label: String,
    /// The href anchors use to reference this record.
    pub href: String,
    pub created_at: DateTime<Utc>,
}

impl LinkRecordItem {
    pub fn new(record: LinkRecord, href: String) -> Self {
        Self {
            label: record.label(),
            id: record.id,
            uri: record.uri,
            title: record.title,
            href,
            created_at: record.created_at,
        }
    }
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}
