//! Local key/value store
//!
//! A string-to-string store with `getItem`/`setItem` semantics. The file
//! backend keeps every key in one JSON object and re-reads the file on each
//! access, so a read always sees the latest persisted value.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::RegisterError;

type Items = BTreeMap<String, String>;

/// Key/value storage for string items
pub trait LocalStore {
    /// Read an item, `None` if the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, RegisterError>;

    /// Write an item, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), RegisterError>;

    /// Remove an item; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<(), RegisterError>;
}

/// File-backed store (`data/local_storage.json`)
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every item; a missing file has none
    fn read_items(&self) -> Result<Items, RegisterError> {
        if !self.path.exists() {
            return Ok(Items::new());
        }

        let file = File::open(&self.path).map_err(|e| {
            RegisterError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            RegisterError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Items to write back over; an unreadable file is replaced wholesale
    fn items_for_write(&self) -> Items {
        self.read_items().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable local store");
            Items::new()
        })
    }

    /// Replace the file with `items`, via a sibling temp file and a rename
    fn write_items(&self, items: &Items) -> Result<(), RegisterError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                RegisterError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let file = File::create(&temp_path)
            .map_err(|e| RegisterError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, items)
            .map_err(|e| RegisterError::Storage(format!("Failed to serialize store: {}", e)))?;
        writer
            .flush()
            .and_then(|_| writer.get_ref().sync_all())
            .map_err(|e| RegisterError::Storage(format!("Failed to write store: {}", e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            RegisterError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })
    }
}

impl LocalStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, RegisterError> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), RegisterError> {
        let mut items = self.items_for_write();
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), RegisterError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut items = self.items_for_write();
        if items.remove(key).is_some() {
            self.write_items(&items)?;
        }
        Ok(())
    }
}

/// In-memory store, used for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Items>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one item
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut items) = store.items.write() {
            items.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl LocalStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, RegisterError> {
        let items = self.items.read().map_err(|e| {
            RegisterError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), RegisterError> {
        let mut items = self.items.write().map_err(|e| {
            RegisterError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), RegisterError> {
        let mut items = self.items.write().map_err(|e| {
            RegisterError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_store() -> (TempDir, FileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data").join("local_storage.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_file_store_missing_file_has_no_items() {
        let (_dir, store) = file_store();
        assert_eq!(store.get_item("anything").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let (_dir, store) = file_store();

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("1"));

        store.remove_item("a").unwrap();
        assert_eq!(store.get_item("a").unwrap(), None);
        assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_sees_external_writes() {
        let (_dir, store) = file_store();
        let other = FileStore::new(store.path().to_path_buf());

        store.set_item("key", "first").unwrap();
        other.set_item("key", "second").unwrap();

        assert_eq!(store.get_item("key").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let (_dir, store) = file_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "<<garbage>>").unwrap();

        assert!(store.get_item("key").is_err());

        // Writing replaces the unreadable file
        store.set_item("key", "value").unwrap();
        assert_eq!(store.get_item("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_file_store_write_leaves_no_temp_file() {
        let (dir, store) = file_store();
        store.set_item("registrationFormData", "{}").unwrap();

        assert!(store.path().exists());
        assert!(!dir.path().join("data").join("local_storage.json.tmp").exists());

        let raw: Items = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw.get("registrationFormData").map(String::as_str), Some("{}"));
    }

    #[test]
    fn test_file_store_remove_without_file() {
        let (_dir, store) = file_store();
        store.remove_item("key").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_item("k", "v");
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }
}
