//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRecordRepository`] - Link record storage and lookup
//! - [`SettingsRepository`] - Internal-pattern configuration
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_record_repository;
pub mod settings_repository;

pub use link_record_repository::LinkRecordRepository;
pub use settings_repository::SettingsRepository;

#[cfg(test)]
pub use link_record_repository::MockLinkRecordRepository;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
