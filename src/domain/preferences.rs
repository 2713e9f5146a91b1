// src/domain/preferences.rs
//
// The two named client-preference lists and their storage identity.
// One module owns the key names; nothing else spells them out.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the recently-viewed list.
pub const RECENTLY_VIEWED_CAPACITY: usize = 6;

/// The two client-resident preference lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceList {
    /// Ordered (most-recent-first), deduplicated, capacity-bounded ring.
    RecentlyViewed,
    /// Deduplicated set, unbounded, insertion order kept for display.
    Watchlist,
}

impl PreferenceList {
    /// Storage key under which the list is persisted.
    pub fn key(&self) -> &'static str {
        match self {
            PreferenceList::RecentlyViewed => "recently_viewed",
            PreferenceList::Watchlist => "saved_trucks",
        }
    }

    /// File name used by the file-backed storage for this key.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.key())
    }

    /// Reverse of `file_name`, used by the storage watcher to map an
    /// observed file event back to a list.
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            "recently_viewed.json" => Some(PreferenceList::RecentlyViewed),
            "saved_trucks.json" => Some(PreferenceList::Watchlist),
            _ => None,
        }
    }
}

impl std::fmt::Display for PreferenceList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_round_trip() {
        for list in [PreferenceList::RecentlyViewed, PreferenceList::Watchlist] {
            assert_eq!(PreferenceList::from_file_name(&list.file_name()), Some(list));
        }
    }

    #[test]
    fn test_unknown_file_name_is_ignored() {
        assert_eq!(PreferenceList::from_file_name("saved_trucks.json.tmp"), None);
        assert_eq!(PreferenceList::from_file_name("other.json"), None);
    }
}
