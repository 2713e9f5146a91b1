// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod media_service;
pub mod preference_service;

#[cfg(test)]
mod catalog_service_tests;
#[cfg(test)]
mod preference_service_tests;

// Re-export all services and their types
pub use catalog_service::{
    CatalogService,
    CreateTruckRequest,
};

pub use media_service::{
    MediaService,
    UploadFile,
};

pub use preference_service::PreferenceService;
