//! Internal-pattern configuration snapshot.

use chrono::{DateTime, Utc};

/// The stored internal-pattern configuration.
///
/// `internal_patterns` is the raw multi-line text, one wildcard domain per
/// line. `version` increases on every save and keys the compiled-pattern
/// cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSettings {
    pub internal_patterns: String,
    pub version: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PatternSettings {
    pub fn new(internal_patterns: String, version: i64, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            internal_patterns,
            version,
            updated_at,
        }
    }

    /// Settings used before anything has been saved: nothing is internal.
    pub fn empty() -> Self {
        Self::new(String::new(), 0, None)
    }
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self::empty()
    }
}
