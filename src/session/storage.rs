//! Key-value storage behind the session controller.
//!
//! The session only needs get/set/remove over opaque string blobs (the
//! equivalent of the browser's local storage in the original game). Keeping
//! the trait this small lets tests run against an in-memory map and the CLI
//! against plain files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Minimal persistent string store.
///
/// Implementations must not fail loudly: a storage problem degrades the
/// experience (progress may not survive a restart) but never interrupts the
/// game, matching the original's swallowed storage exceptions.
pub trait Storage {
    /// Fetch the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous blob.
    fn set(&mut self, key: &str, value: &str);
    /// Delete the blob under `key`, if present.
    fn remove(&mut self, key: &str);
}

/// Volatile storage for tests and `--memory` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    map: HashMap<String, String>,
}

impl MemoryStorage {
    /// Empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

/// File-backed storage: one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::write(&path, value) {
            warn!(path = %path.display(), error = %e, "failed to persist state");
        }
    }

    fn remove(&mut self, key: &str) {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "failed to remove state"),
        }
    }
}
