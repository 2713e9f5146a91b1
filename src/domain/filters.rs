// src/domain/filters.rs
//
// Typed search criteria for the catalog.
//
// Every supported filter is an explicit optional field; there is no
// open-ended bag of keys, so an unsupported combination cannot silently
// no-op. Status equality is the only predicate the remote store evaluates;
// the numeric ranges and fuel-type equality are applied client-side by the
// catalog service over the full result set.

use serde::{Deserialize, Serialize};

use crate::domain::truck::{Truck, TruckStatus};

/// Search criteria for catalog queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub fuel_type: Option<String>,
    /// Equality filter, pushed to the remote store.
    pub status: Option<TruckStatus>,
}

impl SearchFilters {
    /// Whether a fetched record passes the client-side predicates.
    /// The status predicate is excluded here - it has already been applied
    /// by the remote query.
    pub fn matches(&self, truck: &Truck) -> bool {
        if let Some(min) = self.min_price {
            if truck.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if truck.price > max {
                return false;
            }
        }
        if let Some(min) = self.min_year {
            if truck.year < min {
                return false;
            }
        }
        if let Some(max) = self.max_year {
            if truck.year > max {
                return false;
            }
        }
        if let Some(fuel) = &self.fuel_type {
            if &truck.fuel_type != fuel {
                return false;
            }
        }
        true
    }
}
