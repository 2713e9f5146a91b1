// src/services/preference_service_tests.rs
//
// UNIT TESTS: preference list properties
//
// PURPOSE:
// - Prove the recently-viewed ring stays bounded, deduplicated and ordered
// - Prove watchlist toggling is an exact state flip per call
// - Prove corrupt persisted data degrades to an empty list, never an error
// - Prove a second process observes watchlist changes through the storage
//   watcher without polling

#[cfg(test)]
mod list_invariant_tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::domain::{TruckSummary, RECENTLY_VIEWED_CAPACITY};
    use crate::events::EventBus;
    use crate::repositories::{MemoryStorage, PreferenceStorage};
    use crate::services::PreferenceService;

    pub(super) fn summary(id: &str) -> TruckSummary {
        TruckSummary {
            id: id.to_string(),
            brand: "Scania".to_string(),
            model: "R450".to_string(),
            year: 2018,
            image: format!("https://blob.example/trucks/{}/images/a.jpg", id),
            status: "available".to_string(),
            location: "Netherlands".to_string(),
            mileage: "620,000 km".to_string(),
        }
    }

    fn memory_service() -> (PreferenceService, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let service = PreferenceService::new(
            Arc::clone(&storage) as Arc<dyn PreferenceStorage>,
            Arc::new(EventBus::new()),
        );
        (service, storage)
    }

    #[test]
    fn test_recently_viewed_is_bounded_deduplicated_and_ordered() {
        let (service, _) = memory_service();

        for i in 0..8 {
            service.record_view(summary(&format!("t-{}", i)));
        }

        let recent = service.recently_viewed();
        assert_eq!(recent.len(), RECENTLY_VIEWED_CAPACITY);
        // Most recent first
        assert_eq!(recent[0].id, "t-7");
        assert_eq!(recent[5].id, "t-2");
        // No duplicates
        let ids: HashSet<_> = recent.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), recent.len());
    }

    #[test]
    fn test_re_viewing_moves_to_front_instead_of_duplicating() {
        let (service, _) = memory_service();

        service.record_view(summary("t-1"));
        service.record_view(summary("t-2"));
        service.record_view(summary("t-3"));
        service.record_view(summary("t-1"));

        let recent = service.recently_viewed();
        let ids: Vec<_> = recent.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["t-1", "t-3", "t-2"]);
    }

    #[test]
    fn test_toggle_twice_is_a_clean_round_trip() {
        let (service, _) = memory_service();

        assert!(service.toggle_watchlist(summary("t-5")));
        assert!(!service.toggle_watchlist(summary("t-5")));
        assert!(!service.is_watched("t-5"));
        assert!(service.watchlist().is_empty());
    }

    #[test]
    fn test_is_watched_follows_toggles() {
        let (service, _) = memory_service();

        assert!(!service.is_watched("t-9"));
        assert!(service.toggle_watchlist(summary("t-9")));
        assert!(service.is_watched("t-9"));
        assert!(!service.toggle_watchlist(summary("t-9")));
        assert!(!service.is_watched("t-9"));
    }

    #[test]
    fn test_watchlist_preserves_insertion_order() {
        let (service, _) = memory_service();

        service.toggle_watchlist(summary("t-1"));
        service.toggle_watchlist(summary("t-2"));
        service.toggle_watchlist(summary("t-3"));
        service.toggle_watchlist(summary("t-2"));

        let ids: Vec<_> = service
            .watchlist()
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(ids, vec!["t-1", "t-3"]);
        assert_eq!(service.watchlist_count(), 2);
    }

    #[test]
    fn test_corrupt_value_degrades_to_empty() {
        let (service, storage) = memory_service();

        storage.write("saved_trucks", "{definitely not json").unwrap();
        storage.write("recently_viewed", "42").unwrap();

        assert!(service.watchlist().is_empty());
        assert!(service.recently_viewed().is_empty());
        assert!(!service.is_watched("t-1"));
    }

    #[test]
    fn test_writes_recover_from_corruption() {
        let (service, storage) = memory_service();

        storage.write("recently_viewed", "corrupt").unwrap();
        service.record_view(summary("t-1"));

        let recent = service.recently_viewed();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, "t-1");
    }
}

#[cfg(test)]
mod failure_and_signal_tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use super::list_invariant_tests::summary;
    use crate::domain::PreferenceList;
    use crate::error::{AppError, AppResult};
    use crate::events::{EventBus, PreferenceListChanged, StorageWatcher};
    use crate::repositories::{FileStorage, PreferenceStorage};
    use crate::services::PreferenceService;

    /// Storage that always fails to persist, simulating quota exhaustion.
    struct BrokenStorage;

    impl PreferenceStorage for BrokenStorage {
        fn read(&self, _key: &str) -> AppResult<Option<String>> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::Other("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_toggle_reports_attempted_state_when_persistence_fails() {
        let service = PreferenceService::new(Arc::new(BrokenStorage), Arc::new(EventBus::new()));

        // The flip is reported to the UI even though nothing stuck
        assert!(service.toggle_watchlist(summary("t-5")));
        // Durability is best-effort: the store never saw the entry
        assert!(!service.is_watched("t-5"));
    }

    #[test]
    fn test_toggle_signals_the_watchlist() {
        let bus = Arc::new(EventBus::new());
        let watchlist_signals = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&watchlist_signals);
        let _sub = bus.subscribe::<PreferenceListChanged, _>(move |event| {
            if event.list == PreferenceList::Watchlist {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let service = PreferenceService::new(
            Arc::new(crate::repositories::MemoryStorage::new()),
            Arc::clone(&bus),
        );

        service.toggle_watchlist(summary("t-5"));
        assert_eq!(watchlist_signals.load(Ordering::SeqCst), 1);
    }

    /// Two storefront processes sharing one profile directory. Process A
    /// toggles; process B must observe the change through the storage
    /// watcher and report membership without any explicit refresh.
    #[test]
    fn test_second_process_observes_watchlist_change() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        // "Tab" A: plain service on the shared directory
        let service_a = PreferenceService::new(
            Arc::new(FileStorage::open(dir.path())?),
            Arc::new(EventBus::new()),
        );

        // "Tab" B: own bus, own service, watcher on the shared directory
        let bus_b = Arc::new(EventBus::new());
        let service_b = Arc::new(PreferenceService::new(
            Arc::new(FileStorage::open(dir.path())?),
            Arc::clone(&bus_b),
        ));

        let observed = Arc::new(AtomicBool::new(false));
        let observed_handler = Arc::clone(&observed);
        let service_for_handler = Arc::clone(&service_b);
        let _sub = bus_b.subscribe::<PreferenceListChanged, _>(move |event| {
            // Re-pull on signal: the handler asks the store, the event
            // carries no payload
            if event.list == PreferenceList::Watchlist && service_for_handler.is_watched("5") {
                observed_handler.store(true, Ordering::SeqCst);
            }
        });
        let _watcher = StorageWatcher::watch(dir.path(), (*bus_b).clone())?;

        service_a.toggle_watchlist(summary("5"));

        let deadline = Instant::now() + Duration::from_secs(5);
        while !observed.load(Ordering::SeqCst) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(25));
        }
        assert!(
            observed.load(Ordering::SeqCst),
            "process B never observed the toggle from process A"
        );
        Ok(())
    }
}
