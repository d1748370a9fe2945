//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    EntityOperations, LinkRecordService, LinkReplacer, SettingsService,
};
use crate::domain::href::CanonicalPath;
use crate::domain::repositories::{LinkRecordRepository, SettingsRepository};
use crate::infrastructure::cache::CacheService;

pub type DynLinkRecordService = LinkRecordService<dyn LinkRecordRepository>;
pub type DynSettingsService = SettingsService<dyn SettingsRepository>;
pub type DynLinkReplacer = LinkReplacer<dyn LinkRecordRepository, dyn SettingsRepository>;
pub type DynEntityOperations = EntityOperations<dyn LinkRecordRepository, dyn SettingsRepository>;

/// Services shared by all requests.
///
/// Repositories are held as trait objects so the same state serves the
/// PostgreSQL deployment and in-memory test setups.
#[derive(Clone)]
pub struct AppState {
    pub link_record_service: Arc<DynLinkRecordService>,
    pub settings_service: Arc<DynSettingsService>,
    pub link_replacer: Arc<DynLinkReplacer>,
    pub entity_operations: Arc<DynEntityOperations>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the services on top of the given repositories and cache.
    pub fn new(
        link_records: Arc<dyn LinkRecordRepository>,
        settings: Arc<dyn SettingsRepository>,
        cache: Arc<dyn CacheService>,
        canonical: CanonicalPath,
        cache_ttl_seconds: u64,
    ) -> Self {
        let link_record_service = Arc::new(
            LinkRecordService::new(link_records, cache.clone()).with_cache_ttl(cache_ttl_seconds),
        );
        let settings_service = Arc::new(SettingsService::new(settings));
        let link_replacer = Arc::new(LinkReplacer::new(
            link_record_service.clone(),
            settings_service.clone(),
            canonical,
        ));
        let entity_operations = Arc::new(EntityOperations::new(link_replacer.clone()));

        Self {
            link_record_service,
            settings_service,
            link_replacer,
            entity_operations,
            cache,
        }
    }
}
