//! Router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                  - Health check: DB, settings, cache
//! - `POST /api/transform`           - Rewrite one HTML fragment
//! - `POST /api/entities/presave`    - Rewrite the rich-text fields of an entity
//! - `GET  /api/settings`            - Current internal patterns
//! - `PUT  /api/settings`            - Save internal patterns
//! - `POST /api/settings/validate`   - Check internal patterns without saving
//! - `GET  /api/links`               - Paginated link records
//! - `GET  /api/links/{id}`          - One link record
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    get_link_handler, get_settings_handler, health_handler, list_links_handler, presave_handler,
    transform_handler, update_settings_handler, validate_settings_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/transform", post(transform_handler))
        .route("/entities/presave", post(presave_handler))
        .route(
            "/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
        .route("/settings/validate", post(validate_settings_handler))
        .route("/links", get(list_links_handler))
        .route("/links/{id}", get(get_link_handler))
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
