//! Business logic services for the application layer.

pub mod entity_operations;
pub mod href_classifier;
pub mod link_record_service;
pub mod link_replacer;
pub mod settings_service;

pub use entity_operations::EntityOperations;
pub use href_classifier::HrefClassifier;
pub use link_record_service::{LinkRecordService, ResolveError};
pub use link_replacer::LinkReplacer;
pub use settings_service::SettingsService;
