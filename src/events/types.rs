// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::PreferenceList;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// PREFERENCE EVENTS
// ============================================================================

/// Emitted whenever one of the client preference lists changed, no matter
/// where the change originated (this process or an external writer observed
/// by the storage watcher). Listeners re-read the preference store; the
/// event carries no list contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceListChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub list: PreferenceList,
}

impl PreferenceListChanged {
    pub fn new(list: PreferenceList) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            list,
        }
    }
}

impl DomainEvent for PreferenceListChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PreferenceListChanged" }
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a new truck record has been persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub truck_id: String,
    pub model: String,
}

impl TruckCreated {
    pub fn new(truck_id: String, model: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            truck_id,
            model,
        }
    }
}

impl DomainEvent for TruckCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "TruckCreated" }
}

/// Emitted when truck metadata is updated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub truck_id: String,
}

impl TruckUpdated {
    pub fn new(truck_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            truck_id,
        }
    }
}

impl DomainEvent for TruckUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "TruckUpdated" }
}

/// Emitted after a truck record and its media have been retired
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub truck_id: String,
}

impl TruckDeleted {
    pub fn new(truck_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            truck_id,
        }
    }
}

impl DomainEvent for TruckDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "TruckDeleted" }
}
