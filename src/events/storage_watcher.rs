// events/storage_watcher.rs
//
// Cross-process half of the preference-change notifier.
//
// A second storefront process ("another tab") mutating the shared profile
// directory is invisible to this process's event bus, so a filesystem
// watcher observes the preference key files and routes every relevant
// change through the same funnel the in-process writers use. Consumers
// subscribe to `PreferenceListChanged` and cannot tell the origins apart.

use std::path::Path;

use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::PreferenceList;
use crate::error::AppResult;
use crate::events::{notify_preference_change, EventBus};

/// Watches the preference storage directory and re-emits external writes as
/// `PreferenceListChanged` events on the local bus.
///
/// Watching stops when this value is dropped.
pub struct StorageWatcher {
    _watcher: RecommendedWatcher,
}

impl StorageWatcher {
    /// Start watching `dir` (the preferences directory) on behalf of `bus`.
    /// The directory must already exist.
    pub fn watch(dir: &Path, bus: EventBus) -> AppResult<Self> {
        let mut watcher = recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if !matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) {
                        return;
                    }
                    for path in &event.paths {
                        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                            continue;
                        };
                        // Temp files and unrelated entries map to no list
                        if let Some(list) = PreferenceList::from_file_name(name) {
                            notify_preference_change(&bus, list);
                        }
                    }
                }
                Err(err) => log::warn!("Preference storage watcher error: {}", err),
            }
        })?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(Self { _watcher: watcher })
    }
}
