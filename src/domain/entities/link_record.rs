//! Link record entity representing one deduplicated external URI.

use chrono::{DateTime, Utc};

/// Maximum length of a link record URI, in characters.
pub const MAX_URI_LENGTH: usize = 2048;

/// Maximum length of a link record title, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// A deduplicated external link.
///
/// At most one record exists per exact `uri` string. Records are created
/// lazily the first time an eligible href is seen and are never updated
/// afterwards: the first title written wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: i64,
    pub uri: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates a new LinkRecord instance.
    pub fn new(id: i64, uri: String, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            uri,
            title,
            created_at,
        }
    }

    /// Human readable label, e.g. `Link 1 (http://example.com/1)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.uri)
    }
}

/// Input data for creating a new link record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkRecord {
    pub uri: String,
    pub title: String,
}

impl NewLinkRecord {
    /// Builds the insert payload, applying the title fallback and truncation.
    ///
    /// Returns `None` when `uri` exceeds [`MAX_URI_LENGTH`] characters.
    pub fn prepare(uri: &str, title: &str) -> Option<Self> {
        if uri.chars().count() > MAX_URI_LENGTH {
            return None;
        }

        let title = if title.is_empty() { uri } else { title };

        Some(Self {
            uri: uri.to_string(),
            title: title.chars().take(MAX_TITLE_LENGTH).collect(),
        })
    }
}
