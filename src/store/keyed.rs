//! Durable keyed storage for named JSON blobs.
//!
//! The schedule keeps two blobs, one per store service. Each blob carries a
//! `version` field so the two can evolve independently.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

/// Get/set-by-name persistence.
pub trait KeyValueStore {
    /// Returns the blob stored under `key`, if any.
    fn get(&self, key: &str) -> EngineResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> EngineResult<()>;
}

/// A process-local store, useful for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EngineResult<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each blob as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> EngineResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| EngineError::StoreWrite {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EngineError::StoreRead {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> EngineResult<()> {
        // Readers see either the old blob or the new one.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|e| EngineError::StoreWrite {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}

/// Reads and decodes a versioned blob.
///
/// Returns `Ok(None)` when nothing has been stored yet.
pub(crate) fn load_blob<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
    max_version: u32,
) -> EngineResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        debug!(key, "No stored blob, starting empty");
        return Ok(None);
    };

    let corrupt = |message: String| EngineError::StoreCorrupt {
        key: key.to_string(),
        message,
    };

    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| corrupt(e.to_string()))?;
    let found = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| corrupt("missing version".to_string()))?;

    if found > u64::from(max_version) {
        return Err(EngineError::UnsupportedStoreVersion {
            key: key.to_string(),
            found: u32::try_from(found).unwrap_or(u32::MAX),
            expected: max_version,
        });
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| corrupt(e.to_string()))
}

/// Encodes a blob as compact JSON.
pub(crate) fn encode_blob<T: Serialize>(key: &str, blob: &T) -> EngineResult<String> {
    serde_json::to_string(blob).map_err(|e| EngineError::StoreWrite {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        version: u32,
        items: Vec<String>,
    }

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("data")).unwrap();
        store.set("attendance", "{\"version\":1}").unwrap();

        let reopened = JsonFileStore::open(dir.path().join("data")).unwrap();
        assert_eq!(
            reopened.get("attendance").unwrap().as_deref(),
            Some("{\"version\":1}")
        );
        assert_eq!(reopened.get("missing").unwrap(), None);
    }

    #[test]
    fn test_load_blob_round_trip() {
        let mut store = MemoryStore::new();
        let blob = Blob {
            version: 1,
            items: vec!["a".to_string()],
        };
        store.set("b", &encode_blob("b", &blob).unwrap()).unwrap();

        let loaded: Option<Blob> = load_blob(&store, "b", 1).unwrap();
        assert_eq!(loaded, Some(blob));
    }

    #[test]
    fn test_load_blob_missing_is_none() {
        let loaded: Option<Blob> = load_blob(&MemoryStore::new(), "b", 1).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_blob_rejects_newer_version() {
        let mut store = MemoryStore::new();
        store.set("b", r#"{"version":2,"items":[]}"#).unwrap();

        let result: EngineResult<Option<Blob>> = load_blob(&store, "b", 1);
        assert!(matches!(
            result,
            Err(EngineError::UnsupportedStoreVersion { found: 2, expected: 1, .. })
        ));
    }

    #[test]
    fn test_load_blob_reports_corruption() {
        let mut store = MemoryStore::new();
        store.set("b", "not json").unwrap();
        let result: EngineResult<Option<Blob>> = load_blob(&store, "b", 1);
        assert!(matches!(result, Err(EngineError::StoreCorrupt { .. })));

        store.set("b", r#"{"items":[]}"#).unwrap();
        let result: EngineResult<Option<Blob>> = load_blob(&store, "b", 1);
        assert!(matches!(result, Err(EngineError::StoreCorrupt { .. })));
    }
}
