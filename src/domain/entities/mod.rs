//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - A deduplicated external link
//! - [`PatternSettings`] - The stored internal-pattern configuration
//! - [`FieldableEntity`] - A host content entity handed to the presave hook
//!
//! Creation payloads live next to their entity (`NewLinkRecord`).

pub mod fieldable_entity;
pub mod link_record;
pub mod pattern_settings;

pub use fieldable_entity::{Field, FieldItem, FieldKind, FieldableEntity};
pub use link_record::{LinkRecord, MAX_TITLE_LENGTH, MAX_URI_LENGTH, NewLinkRecord};
pub use pattern_settings::PatternSettings;
