//! JSON file backend
//!
//! The whole map is one JSON object. Every mutation rewrites it through a
//! temporary sibling file that is renamed over the original. The in-memory
//! map only changes once that write has succeeded.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Store persisted to a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = if path.exists() {
            let json = fs::read_to_string(&path)?;
            if json.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&json)?
            }
        } else {
            BTreeMap::new()
        };
        log::info!("Opened store {} ({} keys)", path.display(), items.len());
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Persist `items`, then adopt them as the current map
    fn commit(&mut self, items: BTreeMap<String, String>) -> Result<(), StorageError> {
        self.write(&items)?;
        self.items = items;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.clone();
        items.insert(key.to_string(), value.to_string());
        self.commit(items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut items = self.items.clone();
        items.remove(key);
        self.commit(items)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.commit(BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Storage;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert_eq!(store.get_item("anything").unwrap(), None);
    }

    #[test]
    fn test_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set_item("block_tower_high_score", "42").unwrap();
            store.set_item("gone", "x").unwrap();
            store.remove_item("gone").unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.get_item("block_tower_high_score").unwrap().as_deref(),
            Some("42")
        );
        assert_eq!(store.get_item("gone").unwrap(), None);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set_item("a", "1").unwrap();
        store.clear().unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_item("a").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn test_failed_write_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set_item("a", "1").unwrap();

        // A directory in the way of the temporary file makes every write fail
        fs::create_dir(path.with_extension("tmp")).unwrap();

        assert!(store.set_item("a", "2").is_err());
        assert!(store.set_item("b", "3").is_err());
        assert!(store.remove_item("a").is_err());
        assert!(store.clear().is_err());
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get_item("b").unwrap(), None);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_item("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_unwritable_location_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::open(blocker.join("store.json")).unwrap();
        assert!(store.set_item("block_tower_high_score", "10").is_err());
        assert_eq!(store.get_item("block_tower_high_score").unwrap(), None);

        let mut storage = Storage::new(store);
        assert!(!storage.save_high_score(10));
        assert_eq!(storage.high_score(), 0);
    }
}
