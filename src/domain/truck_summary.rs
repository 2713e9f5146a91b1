// src/domain/truck_summary.rs
//
// Minimal projection of a Truck, small enough to persist in the
// client-side preference lists without a live record fetch.

use serde::{Deserialize, Serialize};

/// What the preference lists remember about a truck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruckSummary {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Primary image URL
    pub image: String,
    pub status: String,
    pub location: String,
    pub mileage: String,
}
