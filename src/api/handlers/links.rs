//! Handlers for browsing link records.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::link_record::{LinkRecordItem, LinkRecordListResponse, PaginationMeta};
use crate::api::dto::pagination::PaginationParams;
use crate::error::AppError;
use crate::state::AppState;

/// Lists link records, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 1000)
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkRecordListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (records, total_items) = tokio::try_join!(
        state.link_record_service.list(offset, limit),
        state.link_record_service.count()
    )?;

    let canonical = state.link_replacer.canonical();
    let items = records
        .into_iter()
        .map(|record| {
            let href = canonical.href_for(record.id);
            LinkRecordItem::new(record, href)
        })
        .collect();

    Ok(Json(LinkRecordListResponse {
        pagination: PaginationMeta {
            page: params.page(),
            page_size: params.page_size(),
            total_items,
            total_pages: params.total_pages(total_items),
        },
        items,
    }))
}

/// Returns one link record.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no record has this id.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LinkRecordItem>, AppError> {
    let record = state.link_record_service.get(id).await?;
    let href = state.link_replacer.canonical().href_for(record.id);

    Ok(Json(LinkRecordItem::new(record, href)))
}
