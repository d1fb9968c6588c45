//! Key/value persistence contract and its implementations.
//!
//! The engine's collaborator is a plain two-method store over
//! JSON-serializable values per key. [`TieredStore`] layers a synced
//! (authoritative) store over a local fallback with a one-time forward
//! migration, mirroring a browser's sync/local storage pair.

pub mod keys;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::{Result, RuntimeError};

/// One batch of key/value pairs read from or written to a store.
pub type StoreMap = HashMap<String, Value>;

/// Minimal persistence contract.
///
/// `set` is fire-and-forget from the engine's point of view: the session
/// hands a computed batch to the store and never awaits acknowledgment
/// before returning UI events.
pub trait KeyValueStore: Send + Sync {
    /// Returns the subset of `keys` present in the store.
    fn get(&self, keys: &[&str]) -> Result<StoreMap>;

    /// Writes the given entries, leaving other keys untouched.
    fn set(&self, entries: StoreMap) -> Result<()>;
}

/// In-memory store, used in tests and as the session-local cache layer.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<StoreMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing entries.
    pub fn with_entries(entries: StoreMap) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, keys: &[&str]) -> Result<StoreMap> {
        let entries = self
            .entries
            .lock()
            .map_err(|error| RuntimeError::Store(format!("lock poisoned: {error}")))?;
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(*key).map(|value| ((*key).to_owned(), value.clone())))
            .collect())
    }

    fn set(&self, batch: StoreMap) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|error| RuntimeError::Store(format!("lock poisoned: {error}")))?;
        entries.extend(batch);
        Ok(())
    }
}

/// File-backed store: one JSON object per file, written atomically via a
/// temp file and rename.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Default store location under the platform data directory.
    pub fn default_path(app_name: &str) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", app_name)
            .map(|dirs| dirs.data_dir().join("store.json"))
    }

    fn read_all(&self) -> Result<StoreMap> {
        if !self.path.exists() {
            return Ok(StoreMap::new());
        }
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_all(&self, entries: &StoreMap) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, keys: &[&str]) -> Result<StoreMap> {
        let _guard = self
            .lock
            .lock()
            .map_err(|error| RuntimeError::Store(format!("lock poisoned: {error}")))?;
        let all = self.read_all()?;
        Ok(keys
            .iter()
            .filter_map(|key| all.get(*key).map(|value| ((*key).to_owned(), value.clone())))
            .collect())
    }

    fn set(&self, batch: StoreMap) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|error| RuntimeError::Store(format!("lock poisoned: {error}")))?;
        let mut all = self.read_all()?;
        all.extend(batch);
        self.write_all(&all)
    }
}

/// Two-tier store: the synced tier is authoritative; when it holds nothing
/// for a read, the local tier is consulted once and its contents are
/// copied forward. Data never flows synced → local, and writes go to the
/// synced tier only.
pub struct TieredStore {
    synced: Arc<dyn KeyValueStore>,
    local: Arc<dyn KeyValueStore>,
}

impl TieredStore {
    pub fn new(synced: Arc<dyn KeyValueStore>, local: Arc<dyn KeyValueStore>) -> Self {
        Self { synced, local }
    }
}

impl KeyValueStore for TieredStore {
    fn get(&self, keys: &[&str]) -> Result<StoreMap> {
        let synced = self.synced.get(keys)?;
        if !synced.is_empty() {
            return Ok(synced);
        }

        let local = self.local.get(keys)?;
        if !local.is_empty() {
            tracing::info!(
                entries = local.len(),
                "synced store empty, migrating local data forward"
            );
            self.synced.set(local.clone())?;
        }
        Ok(local)
    }

    fn set(&self, entries: StoreMap) -> Result<()> {
        self.synced.set(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, Value)]) -> StoreMap {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect()
    }

    #[test]
    fn memory_store_returns_only_present_keys() {
        let store = MemoryStore::with_entries(map(&[("profile", json!({"level": 3}))]));
        let found = store.get(&["profile", "quests"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["profile"], json!({"level": 3}));
    }

    #[test]
    fn file_store_round_trips_and_merges() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json")).unwrap();

        store.set(map(&[("profile", json!({"level": 2}))])).unwrap();
        store.set(map(&[("quests", json!([]))])).unwrap();

        let found = store.get(&["profile", "quests"]).unwrap();
        assert_eq!(found["profile"], json!({"level": 2}));
        assert_eq!(found["quests"], json!([]));
    }

    #[test]
    fn tiered_store_migrates_local_forward_once() {
        let synced = Arc::new(MemoryStore::new());
        let local = Arc::new(MemoryStore::with_entries(map(&[(
            "profile",
            json!({"level": 7}),
        )])));
        let tiered = TieredStore::new(synced.clone(), local.clone());

        let found = tiered.get(&["profile"]).unwrap();
        assert_eq!(found["profile"], json!({"level": 7}));

        // The migration copied the data into the synced tier
        let synced_now = synced.get(&["profile"]).unwrap();
        assert_eq!(synced_now["profile"], json!({"level": 7}));

        // Later writes land in the synced tier, never back in local
        tiered
            .set(map(&[("profile", json!({"level": 8}))]))
            .unwrap();
        assert_eq!(synced.get(&["profile"]).unwrap()["profile"], json!({"level": 8}));
        assert_eq!(local.get(&["profile"]).unwrap()["profile"], json!({"level": 7}));
    }

    #[test]
    fn tiered_store_prefers_synced_data() {
        let synced = Arc::new(MemoryStore::with_entries(map(&[(
            "profile",
            json!({"level": 10}),
        )])));
        let local = Arc::new(MemoryStore::with_entries(map(&[(
            "profile",
            json!({"level": 1}),
        )])));
        let tiered = TieredStore::new(synced, local);

        let found = tiered.get(&["profile"]).unwrap();
        assert_eq!(found["profile"], json!({"level": 10}));
    }
}
