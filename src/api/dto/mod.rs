//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod health;
pub mod link_record;
pub mod pagination;
pub mod presave;
pub mod settings;
pub mod transform;
