// src/application/queries.rs
//
// Catalog view queries - the UI boundary of the read path.
//
// Presentation code consumes an explicit loading state machine instead of
// raw futures: idle → loading → (success | error), re-entered by refresh().
// Overlapping refreshes are not coalesced; a later call supersedes the
// earlier one's eventual write, checked by a generation counter. Only the
// latest result is ever displayed, so the stale write is discarded rather
// than corrected.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::truck::Truck;
use crate::domain::SearchFilters;
use crate::services::CatalogService;

/// Generic, user-safe messages; the underlying error is logged, never shown.
const LIST_ERROR: &str = "Failed to load trucks";
const DETAIL_ERROR: &str = "Failed to load truck";

/// Loading state of one catalog query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Clone)]
enum ListKind {
    Available,
    Search(SearchFilters),
}

/// List query: the main inventory view or a filtered search.
#[derive(Clone)]
pub struct TruckListQuery {
    service: Arc<CatalogService>,
    kind: ListKind,
    state: Arc<RwLock<QueryState<Vec<Truck>>>>,
    generation: Arc<AtomicU64>,
}

impl TruckListQuery {
    pub fn available(service: Arc<CatalogService>) -> Self {
        Self::new(service, ListKind::Available)
    }

    pub fn search(service: Arc<CatalogService>, filters: SearchFilters) -> Self {
        Self::new(service, ListKind::Search(filters))
    }

    fn new(service: Arc<CatalogService>, kind: ListKind) -> Self {
        Self {
            service,
            kind,
            state: Arc::new(RwLock::new(QueryState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current state (defensive copy).
    pub fn state(&self) -> QueryState<Vec<Truck>> {
        self.state.read().unwrap().clone()
    }

    /// Enter loading and fetch. Safe to call from any state; a refresh
    /// issued while another is in flight wins the final state.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().unwrap() = QueryState::Loading;

        let result = match &self.kind {
            ListKind::Available => self.service.list_available().await,
            ListKind::Search(filters) => self.service.search(filters).await,
        };

        // Superseded by a newer refresh: its result is the one on screen
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }

        *self.state.write().unwrap() = match result {
            Ok(trucks) => QueryState::Success(trucks),
            Err(err) => {
                log::error!("Truck list load failed: {}", err);
                QueryState::Error(LIST_ERROR.to_string())
            }
        };
    }
}

/// Detail query for a single truck. An id that no longer exists resolves
/// to `Success(None)`: navigating to a stale listing is an expected
/// outcome, not an error.
#[derive(Clone)]
pub struct TruckDetailQuery {
    service: Arc<CatalogService>,
    truck_id: String,
    state: Arc<RwLock<QueryState<Option<Truck>>>>,
    generation: Arc<AtomicU64>,
}

impl TruckDetailQuery {
    pub fn new(service: Arc<CatalogService>, truck_id: impl Into<String>) -> Self {
        Self {
            service,
            truck_id: truck_id.into(),
            state: Arc::new(RwLock::new(QueryState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn state(&self) -> QueryState<Option<Truck>> {
        self.state.read().unwrap().clone()
    }

    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().unwrap() = QueryState::Loading;

        let result = self.service.get_truck(&self.truck_id).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }

        *self.state.write().unwrap() = match result {
            Ok(truck) => QueryState::Success(truck),
            Err(err) => {
                log::error!("Truck {} load failed: {}", self.truck_id, err);
                QueryState::Error(DETAIL_ERROR.to_string())
            }
        };
    }
}
