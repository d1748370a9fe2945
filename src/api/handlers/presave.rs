//! Handler for the entity presave hook.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::presave::PresaveRequest;
use crate::domain::entities::FieldableEntity;
use crate::error::AppError;
use crate::state::AppState;

/// Rewrites the rich-text fields of an entity about to be saved.
///
/// # Endpoint
///
/// `POST /api/entities/presave`
///
/// The response is the entity with every `text`, `text_long` and
/// `text_with_summary` value transformed; other fields are echoed unchanged.
///
/// # Errors
///
/// - 400 Bad Request if the entity has no type or a field has no name
/// - 500 Internal Server Error if any value fails to transform; the host
///   must abort the save
pub async fn presave_handler(
    State(state): State<AppState>,
    Json(payload): Json<PresaveRequest>,
) -> Result<Json<FieldableEntity>, AppError> {
    payload.validate()?;

    let entity = state
        .entity_operations
        .entity_presave(payload.entity)
        .await?;

    Ok(Json(entity))
}
