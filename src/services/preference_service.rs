// src/services/preference_service.rs
use std::sync::Arc;

use crate::domain::{PreferenceList, TruckSummary, RECENTLY_VIEWED_CAPACITY};
use crate::events::{notify_preference_change, EventBus};
use crate::repositories::PreferenceStorage;

/// Client-resident preference lists: recently viewed and watchlist.
///
/// Persistence is best-effort by design: a preference that fails to stick
/// degrades the experience, it never fails an interaction. Every read
/// returns an owned snapshot; no caller can alias the stored data.
pub struct PreferenceService {
    storage: Arc<dyn PreferenceStorage>,
    event_bus: Arc<EventBus>,
}

impl PreferenceService {
    pub fn new(storage: Arc<dyn PreferenceStorage>, event_bus: Arc<EventBus>) -> Self {
        Self { storage, event_bus }
    }

    /// The recently viewed list, most recent first.
    pub fn recently_viewed(&self) -> Vec<TruckSummary> {
        self.load(PreferenceList::RecentlyViewed)
    }

    /// Record that a truck detail view was opened. The entry moves to (or
    /// enters at) the front; the list is deduplicated by id and truncated
    /// to its capacity.
    pub fn record_view(&self, summary: TruckSummary) {
        let mut recent = self.load(PreferenceList::RecentlyViewed);
        recent.retain(|entry| entry.id != summary.id);
        recent.insert(0, summary);
        recent.truncate(RECENTLY_VIEWED_CAPACITY);
        self.store(PreferenceList::RecentlyViewed, &recent);
        notify_preference_change(&self.event_bus, PreferenceList::RecentlyViewed);
    }

    /// The watchlist in insertion order.
    pub fn watchlist(&self) -> Vec<TruckSummary> {
        self.load(PreferenceList::Watchlist)
    }

    /// Flip watchlist membership for `summary.id` and return the new state
    /// (`true` = now saved). This is the only watchlist mutation, which is
    /// what makes a double-click two clean flips rather than a partial
    /// update. The returned state reflects the attempted toggle even when
    /// persistence fails underneath.
    pub fn toggle_watchlist(&self, summary: TruckSummary) -> bool {
        let mut saved = self.load(PreferenceList::Watchlist);
        let was_saved = saved.iter().any(|entry| entry.id == summary.id);

        if was_saved {
            saved.retain(|entry| entry.id != summary.id);
        } else {
            saved.push(summary);
        }

        self.store(PreferenceList::Watchlist, &saved);
        notify_preference_change(&self.event_bus, PreferenceList::Watchlist);
        !was_saved
    }

    /// Pure membership query, no side effects.
    pub fn is_watched(&self, truck_id: &str) -> bool {
        self.load(PreferenceList::Watchlist)
            .iter()
            .any(|entry| entry.id == truck_id)
    }

    /// Badge count for the header.
    pub fn watchlist_count(&self) -> usize {
        self.load(PreferenceList::Watchlist).len()
    }

    /// Read a list, degrading to empty on any fault. Corrupt persisted data
    /// is indistinguishable from an absent list on purpose.
    fn load(&self, list: PreferenceList) -> Vec<TruckSummary> {
        let raw = match self.storage.read(list.key()) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Failed to read {} list: {}", list, err);
                None
            }
        };
        let Some(raw) = raw else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Discarding corrupt {} list: {}", list, err);
                Vec::new()
            }
        }
    }

    /// Persist a list, swallowing faults (quota, serialization, IO).
    fn store(&self, list: PreferenceList, entries: &[TruckSummary]) {
        let payload = match serde_json::to_string(entries) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("Failed to serialize {} list: {}", list, err);
                return;
            }
        };
        if let Err(err) = self.storage.write(list.key(), &payload) {
            log::warn!("Failed to persist {} list: {}", list, err);
        }
    }
}
