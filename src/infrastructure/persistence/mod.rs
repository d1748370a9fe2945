//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements. Rows are mapped through `FromRow` structs.
//!
//! # Repositories
//!
//! - [`PgLinkRecordRepository`] - Link record storage and lookup
//! - [`PgSettingsRepository`] - Internal-pattern configuration

pub mod pg_link_record_repository;
pub mod pg_settings_repository;

pub use pg_link_record_repository::PgLinkRecordRepository;
pub use pg_settings_repository::PgSettingsRepository;
