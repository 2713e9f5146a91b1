// src/lib.rs
// TruckHub - catalog and client-preference core for an export truck storefront
//
// Architecture:
// - Domain-centric: catalog entities and preference lists live in domain
// - Event-driven: preference changes propagate through one event funnel,
//   whether they originate in this process or in another one
// - Thin remote boundary: the document store and blob storage clients
//   translate, they never retry or cache
// - Application Layer: loading-state queries consumed by presentation code

// ============================================================================
// CORE MODULES
// ============================================================================

pub mod domain;
pub mod error;
pub mod events;
pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_truck,
    PreferenceList,
    SearchFilters,
    Truck,
    TruckStatus,
    TruckSummary,
    TruckUpdate,
    RECENTLY_VIEWED_CAPACITY,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    notify_preference_change,
    DomainEvent,
    EventBus,
    PreferenceListChanged,
    StorageWatcher,
    Subscription,
    TruckCreated,
    TruckDeleted,
    TruckUpdated,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    FileStorage,
    MemoryStorage,
    PreferenceStorage,
    RemoteTruckRepository,
    TruckRepository,
    TRUCKS_COLLECTION,
};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    BlobStore,
    BlobStoreConfig,
    FirestoreClient,
    FirestoreConfig,
    RemoteBlobStore,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Catalog Service
    CatalogService,
    CreateTruckRequest,

    // Media Service
    MediaService,
    UploadFile,

    // Preference Service
    PreferenceService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, QueryState, TruckDetailQuery, TruckListQuery};
