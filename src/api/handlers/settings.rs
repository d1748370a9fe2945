//! Handlers for the internal-pattern settings.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::settings::{SettingsRequest, SettingsResponse, ValidateSettingsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored internal patterns.
///
/// # Endpoint
///
/// `GET /api/settings`
pub async fn get_settings_handler(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = state.settings_service.current().await?;
    Ok(Json(settings.into()))
}

/// Replaces the internal patterns.
///
/// # Endpoint
///
/// `PUT /api/settings`
///
/// # Request Body
///
/// ```json
/// { "internal_patterns": "*.example.com\nexample.org" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with one message per conflict in
/// `error.details.errors` when a pattern is made redundant by a broader one.
/// Nothing is saved in that case.
pub async fn update_settings_handler(
    State(state): State<AppState>,
    Json(payload): Json<SettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    payload.validate()?;

    let settings = state
        .settings_service
        .save(&payload.internal_patterns)
        .await?;

    Ok(Json(settings.into()))
}

/// Reports conflicts in a pattern list without saving it.
///
/// # Endpoint
///
/// `POST /api/settings/validate`
pub async fn validate_settings_handler(
    State(state): State<AppState>,
    Json(payload): Json<SettingsRequest>,
) -> Result<Json<ValidateSettingsResponse>, AppError> {
    payload.validate()?;

    let errors: Vec<String> = state
        .settings_service
        .conflicts(&payload.internal_patterns)?
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(Json(ValidateSettingsResponse {
        valid: errors.is_empty(),
        errors,
    }))
}
