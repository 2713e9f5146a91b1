// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod storage_watcher;
pub mod types;

use crate::domain::PreferenceList;

// ============================================================================
// PUBLIC EXPORTS - Event Types, Bus and Watcher Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{PreferenceListChanged, TruckCreated, TruckDeleted, TruckUpdated};

pub use bus::{EventBus, Subscription};

pub use storage_watcher::StorageWatcher;

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}

/// The single funnel for preference-change signals.
///
/// Both origins converge here: in-process writers call it directly after a
/// successful mutation, and the storage watcher calls it for writes made by
/// other processes. Consumers subscribe to `PreferenceListChanged` and
/// re-pull the store; they never learn which channel delivered the signal.
pub fn notify_preference_change(bus: &EventBus, list: PreferenceList) {
    bus.emit(PreferenceListChanged::new(list));
}
