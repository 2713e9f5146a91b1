// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod filters;
pub mod preferences;
pub mod truck;
pub mod truck_summary;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Truck Domain
pub use truck::{validate_truck, Truck, TruckStatus, TruckUpdate};

// Preference Lists
pub use preferences::{PreferenceList, RECENTLY_VIEWED_CAPACITY};

// Projections
pub use truck_summary::TruckSummary;

// Search Criteria
pub use filters::SearchFilters;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
