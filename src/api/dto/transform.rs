//! DTOs for the HTML transform endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// An HTML fragment to rewrite. Fragments are limited to 1 MiB.
#[derive(Debug, Deserialize, Validate)]
pub struct TransformRequest {
    #[validate(length(max = 1048576, message = "HTML fragment is too large"))]
    pub html: String,
}

/// The rewritten fragment.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransformResponse {
    pub html: String,
    /// Whether any href was replaced.
    pub changed: bool,
}
