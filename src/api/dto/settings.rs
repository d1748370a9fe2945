//! DTOs for the internal-pattern settings endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::PatternSettings;
use crate::domain::patterns::parse_pattern_list;

/// New internal patterns, one wildcard domain per line.
#[derive(Debug, Deserialize, Validate)]
pub struct SettingsRequest {
    #[validate(length(max = 65536, message = "Pattern list is too large"))]
    pub internal_patterns: String,
}

/// The stored configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub internal_patterns: String,
    /// `internal_patterns` split into lines, blank lines dropped.
    pub patterns: Vec<String>,
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PatternSettings> for SettingsResponse {
    fn from(settings: PatternSettings) -> Self {
        Self {
            patterns: parse_pattern_list(&settings.internal_patterns),
            internal_patterns: settings.internal_patterns,
            version: settings.version,
            updated_at: settings.updated_at,
        }
    }
}

/// Result of a dry-run validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateSettingsResponse {
    pub valid: bool,
    pub errors: Vec<String>,
}
