//! Repository trait for the internal-pattern configuration.

use crate::domain::entities::PatternSettings;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage of the internal domain pattern list.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSettingsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the stored configuration, or [`PatternSettings::empty`] if
    /// nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_pattern_settings(&self) -> Result<PatternSettings, AppError>;

    /// Replaces the raw pattern text and bumps the version.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save_internal_patterns(&self, raw: &str) -> Result<PatternSettings, AppError>;
}
