//! Rewrites external hrefs in an HTML fragment to link record references.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::application::services::{
    HrefClassifier, LinkRecordService, ResolveError, SettingsService,
};
use crate::domain::href::{CanonicalPath, Classification};
use crate::domain::repositories::{LinkRecordRepository, SettingsRepository};
use crate::error::AppError;
use crate::utils::anchors::{AnchorOccurrence, HtmlError, extract_anchors, rewrite_hrefs};

/// The link rewrite engine.
///
/// For every distinct eligible href in a fragment, finds or creates the
/// matching link record and points every anchor carrying that href at the
/// record's canonical path. Hrefs are resolved one after another in order of
/// first occurrence.
pub struct LinkReplacer<R, S>
where
    R: LinkRecordRepository + ?Sized,
    S: SettingsRepository + ?Sized,
{
    classifier: HrefClassifier<R>,
    records: Arc<LinkRecordService<R>>,
    settings: Arc<SettingsService<S>>,
}

impl<R, S> LinkReplacer<R, S>
where
    R: LinkRecordRepository + ?Sized,
    S: SettingsRepository + ?Sized,
{
    pub fn new(
        records: Arc<LinkRecordService<R>>,
        settings: Arc<SettingsService<S>>,
        canonical: CanonicalPath,
    ) -> Self {
        Self {
            classifier: HrefClassifier::new(records.clone(), canonical),
            records,
            settings,
        }
    }

    pub fn canonical(&self) -> &CanonicalPath {
        self.classifier.canonical()
    }

    /// Replaces eligible hrefs in `html`.
    ///
    /// Returns the input unchanged when it has no anchors or nothing was
    /// replaced. Ineligible hrefs and hrefs whose record cannot be created
    /// are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when settings or link records cannot be
    /// read, or the fragment cannot be serialized.
    pub async fn transform(&self, html: &str) -> Result<String, AppError> {
        let anchors = extract_anchors(html).map_err(html_error)?;
        if anchors.is_empty() {
            return Ok(html.to_string());
        }

        let internal = self.settings.compiled().await?;
        let canonical = self.classifier.canonical();

        let mut new_hrefs: HashMap<&str, String> = HashMap::new();
        for anchor in first_occurrences(&anchors) {
            let href = anchor.href.as_str();

            if let Classification::Ineligible(_) = self.classifier.classify(href, &internal).await? {
                continue;
            }

            match self.records.resolve_or_create(href, &anchor.text).await {
                Ok(record) => {
                    new_hrefs.insert(href, canonical.href_for(record.id));
                }
                Err(ResolveError::Creation(e)) => {
                    debug!(href, title = %anchor.text, error = %e, "Could not create link record");
                }
                Err(e @ ResolveError::Lookup(_)) => return Err(e.into()),
            }
        }

        if new_hrefs.is_empty() {
            return Ok(html.to_string());
        }

        let replacements: HashMap<usize, String> = anchors
            .iter()
            .filter_map(|anchor| {
                new_hrefs
                    .get(anchor.href.as_str())
                    .map(|new_href| (anchor.position, new_href.clone()))
            })
            .collect();

        rewrite_hrefs(html, &replacements).map_err(html_error)
    }
}

/// The first anchor of each distinct href, in document order.
fn first_occurrences(anchors: &[AnchorOccurrence]) -> Vec<&AnchorOccurrence> {
    let mut seen = HashSet::new();
    anchors
        .iter()
        .filter(|anchor| seen.insert(anchor.href.as_str()))
        .collect()
}

fn html_error(e: HtmlError) -> AppError {
    AppError::internal("Failed to process HTML", json!({ "reason": e.to_string() }))
}
