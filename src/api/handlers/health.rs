//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 12 link records" },
///     "settings": { "status": "ok", "message": "2 internal patterns (version 3)" },
///     "cache": { "status": "ok", "message": "Cache reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let settings_check = check_settings(&state).await;
    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && settings_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            settings: settings_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_record_service.count().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {} link records", count)),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

/// Loads the settings and compiles them, as a transform would.
async fn check_settings(state: &AppState) -> CheckStatus {
    let settings = match state.settings_service.current().await {
        Ok(settings) => settings,
        Err(e) => return CheckStatus::error(format!("Settings unavailable: {}", e)),
    };

    match state.settings_service.compiled().await {
        Ok(compiled) => CheckStatus::ok(format!(
            "{} internal patterns (version {})",
            compiled.len(),
            settings.version
        )),
        Err(e) => CheckStatus::error(format!("Settings invalid: {}", e)),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache reachable")
    } else {
        CheckStatus::error("Redis connection failed")
    }
}
