//! DTOs for the entity presave endpoint.
//!
//! The request and response bodies are [`FieldableEntity`] values; this
//! module only adds input validation around them.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::entities::FieldableEntity;

/// An entity about to be saved.
#[derive(Debug, Deserialize, Validate)]
#[serde(transparent)]
pub struct PresaveRequest {
    #[validate(custom(function = "validate_entity"))]
    pub entity: FieldableEntity,
}

fn validate_entity(entity: &FieldableEntity) -> Result<(), ValidationError> {
    if entity.entity_type.trim().is_empty() {
        return Err(ValidationError::new("entity_type_required")
            .with_message("entity_type must not be empty".into()));
    }

    if entity.fields.iter().any(|field| field.name.trim().is_empty()) {
        return Err(ValidationError::new("field_name_required")
            .with_message("every field needs a name".into()));
    }

    Ok(())
}
