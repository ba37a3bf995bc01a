//! Key-value stores backing the persisted grid

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{SheetsError, SheetsResult};

/// String key-value store with device-local semantics
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written
    fn get_item(&self, key: &str) -> SheetsResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> SheetsResult<()>;

    fn remove_item(&self, key: &str) -> SheetsResult<()>;
}

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> SheetsResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored value");
                Ok(None)
            }
            Err(e) => Err(SheetsError::StorageRead(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> SheetsResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SheetsError::StorageWrite(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        // Write next to the target and rename so readers never see a partial file
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| {
            SheetsError::StorageWrite(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            SheetsError::StorageWrite(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> SheetsResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SheetsError::StorageWrite(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// In-process store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> SheetsResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| SheetsError::StorageRead("memory store lock poisoned".to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SheetsResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| SheetsError::StorageWrite("memory store lock poisoned".to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SheetsResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| SheetsError::StorageWrite("memory store lock poisoned".to_string()))?;
        items.remove(key);
        Ok(())
    }
}
