//! Utility functions for HTML and URL processing.
//!
//! - [`anchors`] - Anchor extraction and href rewriting over parsed HTML
//! - [`external_url`] - Absolute external URL detection
//! - [`extract_host`] - Raw host extraction from hrefs

pub mod anchors;
pub mod external_url;
pub mod extract_host;
