// src/repositories/preference_repository.rs
//
// Durable key/value persistence for the client preference lists.
//
// One narrow trait owns every read and write of the preference keys; the
// service layer never touches the filesystem directly. The file backend
// mirrors the browser profile this storefront originally lived in: one
// small JSON value per key, scoped to the local user profile.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

pub trait PreferenceStorage: Send + Sync {
    /// Raw value stored under `key`, or None when the key was never written.
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Persist `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> AppResult<()>;
}

/// File-backed storage: `{data_dir}/truckhub/preferences/{key}.json`.
///
/// Writes go through a temp file and a rename so a concurrent reader (or
/// the cross-process storage watcher) never observes a half-written value.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open the per-user default profile directory, creating it if needed.
    pub fn open_default() -> AppResult<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;
        Self::open(data_dir.join("truckhub").join("preferences"))
    }

    /// Open an explicit directory (tests, portable installs).
    pub fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The watched directory; the storage watcher observes this path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl PreferenceStorage for FileStorage {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> AppResult<()> {
        let tmp_path = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, self.key_path(key))?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
