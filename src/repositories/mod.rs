// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls

pub mod preference_repository;
pub mod truck_repository;

pub use preference_repository::{FileStorage, MemoryStorage, PreferenceStorage};
pub use truck_repository::{RemoteTruckRepository, TruckRepository, TRUCKS_COLLECTION};

#[cfg(test)]
pub use truck_repository::MockTruckRepository;
