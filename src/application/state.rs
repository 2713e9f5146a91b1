// src/application/state.rs

use std::sync::Arc;

use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus, StorageWatcher};
use crate::integrations::blobstore::{BlobStoreConfig, RemoteBlobStore};
use crate::integrations::firestore::{FirestoreClient, FirestoreConfig};
use crate::repositories::{FileStorage, RemoteTruckRepository};
use crate::services::{CatalogService, MediaService, PreferenceService};

/// Application state handed to the presentation layer.
/// All fields are Arc-wrapped for thread-safe sharing across views.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub catalog_service: Arc<CatalogService>,
    pub media_service: Arc<MediaService>,
    pub preference_service: Arc<PreferenceService>,

    /// Keeps cross-process preference sync alive for the app lifetime.
    _storage_watcher: Option<StorageWatcher>,
}

impl AppState {
    /// Wire the full stack against the given remote endpoints and the
    /// default per-user profile directory.
    pub fn new(
        firestore_config: FirestoreConfig,
        blob_config: BlobStoreConfig,
    ) -> AppResult<Self> {
        let event_bus = Arc::new(create_event_bus());

        let storage = Arc::new(FileStorage::open_default()?);
        let storage_watcher =
            match StorageWatcher::watch(storage.dir(), (*event_bus).clone()) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    // Same-process signals still work; only other processes
                    // become invisible
                    log::warn!("Cross-process preference sync disabled: {}", err);
                    None
                }
            };
        let preference_service = Arc::new(PreferenceService::new(
            storage,
            Arc::clone(&event_bus),
        ));

        let firestore = Arc::new(FirestoreClient::new(firestore_config));
        let truck_repo = Arc::new(RemoteTruckRepository::new(firestore));

        let blob_store = Arc::new(RemoteBlobStore::new(blob_config));
        let media_service = Arc::new(MediaService::new(blob_store));

        let catalog_service = Arc::new(CatalogService::new(
            truck_repo,
            Arc::clone(&media_service),
            Arc::clone(&event_bus),
        ));

        Ok(Self {
            event_bus,
            catalog_service,
            media_service,
            preference_service,
            _storage_watcher: storage_watcher,
        })
    }

    /// Wire from `TRUCKHUB_*` environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::new(FirestoreConfig::from_env()?, BlobStoreConfig::from_env()?)
    }
}
