//! Save-lifecycle hook applying link replacement to content entities.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::LinkReplacer;
use crate::domain::entities::FieldableEntity;
use crate::domain::repositories::{LinkRecordRepository, SettingsRepository};
use crate::error::AppError;

/// Rewrites the rich-text fields of an entity before it is stored.
pub struct EntityOperations<R, S>
where
    R: LinkRecordRepository + ?Sized,
    S: SettingsRepository + ?Sized,
{
    replacer: Arc<LinkReplacer<R, S>>,
}

impl<R, S> EntityOperations<R, S>
where
    R: LinkRecordRepository + ?Sized,
    S: SettingsRepository + ?Sized,
{
    pub fn new(replacer: Arc<LinkReplacer<R, S>>) -> Self {
        Self { replacer }
    }

    /// Replaces the `value` of every item of every `text`, `text_long` and
    /// `text_with_summary` field, in field order.
    ///
    /// Other field kinds and summaries are returned untouched.
    ///
    /// # Errors
    ///
    /// Any transform error aborts the whole save.
    pub async fn entity_presave(
        &self,
        mut entity: FieldableEntity,
    ) -> Result<FieldableEntity, AppError> {
        for field in entity.fields.iter_mut() {
            if !field.kind.is_supported() {
                continue;
            }

            for item in field.items.iter_mut() {
                item.value = self.replacer.transform(&item.value).await?;
            }

            debug!(
                entity_type = %entity.entity_type,
                field = %field.name,
                items = field.items.len(),
                "Processed field"
            );
        }

        Ok(entity)
    }
}
