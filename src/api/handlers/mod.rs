//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod presave;
pub mod settings;
pub mod transform;

pub use health::health_handler;
pub use links::{get_link_handler, list_links_handler};
pub use presave::presave_handler;
pub use settings::{get_settings_handler, update_settings_handler, validate_settings_handler};
pub use transform::transform_handler;
