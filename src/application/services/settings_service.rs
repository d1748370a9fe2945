//! Internal-pattern configuration service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::PatternSettings;
use crate::domain::patterns::{
    CompiledPatterns, PatternConflict, PatternError, PatternMatcher, find_conflicts,
    parse_pattern_list,
};
use crate::domain::repositories::SettingsRepository;
use crate::error::AppError;

/// Reads, validates and saves the internal domain pattern list.
///
/// Owns the [`PatternMatcher`], so every compiled set handed out matches the
/// stored version and a save is visible to the next transform.
pub struct SettingsService<S: SettingsRepository + ?Sized> {
    repository: Arc<S>,
    matcher: PatternMatcher,
}

impl<S: SettingsRepository + ?Sized> SettingsService<S> {
    pub fn new(repository: Arc<S>) -> Self {
        Self {
            repository,
            matcher: PatternMatcher::new(),
        }
    }

    /// The stored configuration.
    pub async fn current(&self) -> Result<PatternSettings, AppError> {
        self.repository.get_pattern_settings().await
    }

    /// Compiled patterns for the stored configuration.
    pub async fn compiled(&self) -> Result<Arc<CompiledPatterns>, AppError> {
        let settings = self.current().await?;

        self.matcher.compiled(&settings).map_err(|e| {
            AppError::internal(
                "Stored internal patterns do not compile",
                json!({ "reason": e.to_string(), "version": settings.version }),
            )
        })
    }

    /// Every conflicting pair in `raw`, without saving anything.
    pub fn conflicts(&self, raw: &str) -> Result<Vec<PatternConflict>, AppError> {
        find_conflicts(&parse_pattern_list(raw)).map_err(invalid_pattern)
    }

    /// Checks `raw` and returns its patterns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] listing one message per conflict in
    /// `details.errors`.
    pub fn validate(&self, raw: &str) -> Result<Vec<String>, AppError> {
        let patterns = parse_pattern_list(raw);
        let conflicts = find_conflicts(&patterns).map_err(invalid_pattern)?;

        if !conflicts.is_empty() {
            let errors: Vec<String> = conflicts.iter().map(ToString::to_string).collect();
            return Err(AppError::bad_request(
                "Internal domain patterns conflict",
                json!({ "errors": errors }),
            ));
        }

        Ok(patterns)
    }

    /// Validates and stores `raw`, then drops the compiled-pattern cache.
    pub async fn save(&self, raw: &str) -> Result<PatternSettings, AppError> {
        let patterns = self.validate(raw)?;

        let settings = self.repository.save_internal_patterns(raw).await?;
        self.matcher.invalidate();

        info!(
            version = settings.version,
            patterns = patterns.len(),
            "Saved internal domain patterns"
        );

        Ok(settings)
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }
}

fn invalid_pattern(e: PatternError) -> AppError {
    AppError::bad_request("Invalid domain pattern", json!({ "errors": [e.to_string()] }))
}
