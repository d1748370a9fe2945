//! Handler for rewriting a single HTML fragment.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::transform::{TransformRequest, TransformResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Replaces external hrefs in an HTML fragment.
///
/// # Endpoint
///
/// `POST /api/transform`
///
/// # Request Body
///
/// ```json
/// { "html": "<a href=\"http://google.com/\">Hello world</a>" }
/// ```
///
/// # Response
///
/// ```json
/// { "html": "<a href=\"/admin/content/linky/1\">Hello world</a>", "changed": true }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the fragment is too large
/// - 500 Internal Server Error if storage is unavailable
pub async fn transform_handler(
    State(state): State<AppState>,
    Json(payload): Json<TransformRequest>,
) -> Result<Json<TransformResponse>, AppError> {
    payload.validate()?;

    let html = state.link_replacer.transform(&payload.html).await?;
    let changed = html != payload.html;

    Ok(Json(TransformResponse { html, changed }))
}
