//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::LinkRecordService`] - Link record deduplication and creation
//! - [`services::SettingsService`] - Internal-pattern configuration
//! - [`services::HrefClassifier`] - Href eligibility
//! - [`services::LinkReplacer`] - HTML href rewriting
//! - [`services::EntityOperations`] - Entity presave hook

pub mod services;
