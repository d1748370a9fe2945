//! Href classification against the internal patterns and stored records.

use std::sync::Arc;

use crate::application::services::LinkRecordService;
use crate::domain::href::{CanonicalPath, Classification, IneligibleReason, Precheck, precheck};
use crate::domain::patterns::CompiledPatterns;
use crate::domain::repositories::LinkRecordRepository;
use crate::error::AppError;

/// Decides whether an href should be replaced by a link record reference.
///
/// Runs the storage-free rules of [`precheck`] and settles canonical
/// references by loading the record they name. A canonical reference is
/// never eligible, whether or not its record exists.
pub struct HrefClassifier<R: LinkRecordRepository + ?Sized> {
    records: Arc<LinkRecordService<R>>,
    canonical: CanonicalPath,
}

impl<R: LinkRecordRepository + ?Sized> HrefClassifier<R> {
    pub fn new(records: Arc<LinkRecordService<R>>, canonical: CanonicalPath) -> Self {
        Self { records, canonical }
    }

    pub fn canonical(&self) -> &CanonicalPath {
        &self.canonical
    }

    /// Classifies `href`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures while loading a canonical reference.
    pub async fn classify(
        &self,
        href: &str,
        internal: &CompiledPatterns,
    ) -> Result<Classification, AppError> {
        match precheck(href, internal, &self.canonical) {
            Precheck::Eligible => Ok(Classification::Eligible),
            Precheck::Ineligible(reason) => Ok(Classification::Ineligible(reason)),
            Precheck::Canonical(id) => {
                let reason = match self.records.load(id).await? {
                    Some(record) => IneligibleReason::AlreadyCanonical(record.id),
                    None => IneligibleReason::MalformedCanonicalReference(id.to_string()),
                };
                Ok(Classification::Ineligible(reason))
            }
        }
    }
}
