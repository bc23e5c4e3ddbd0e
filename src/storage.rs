//! Durable local key-value storage
//!
//! Stores persist through a [`KeyValueStore`]. Values are JSON documents
//! wrapped in a `{"state": ..., "version": 0}` envelope.

use crate::error::StorageError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Storage key of the persisted cart items.
pub const CART_STORAGE_KEY: &str = "cart-storage";
/// Storage key of the persisted theme preference.
pub const THEME_STORAGE_KEY: &str = "theme-storage";

/// Version written into every envelope.
const STORAGE_VERSION: u32 = 0;

pub type SharedStore = Arc<dyn KeyValueStore>;

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Envelope every persisted record is wrapped in.
#[derive(Debug, Serialize, Deserialize)]
pub struct Persisted<T> {
    pub state: T,

    #[serde(default)]
    pub version: u32,
}

/// Serializes `state` into the envelope and writes it under `key`.
pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    state: &T,
) -> Result<(), StorageError> {
    let envelope = Persisted {
        state,
        version: STORAGE_VERSION,
    };
    store.set(key, serde_json::to_string(&envelope)?)
}

/// Reads the record under `key`.
///
/// Missing, unreadable or malformed records all yield `None`; the latter two
/// are logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read {key}: {e}");
            return None;
        }
    };

    match serde_json::from_str::<Persisted<T>>(&raw) {
        Ok(envelope) => Some(envelope.state),
        Err(e) => {
            warn!("Discarding malformed {key}: {e}");
            None
        }
    }
}

/// Process-local store, mostly for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates the store, creating `root` if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        // Replace atomically through a sibling temp file.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(tmp, path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
