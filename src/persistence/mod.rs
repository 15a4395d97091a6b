//! High score and settings persistence
//!
//! Features:
//! - Pluggable string key-value backends (`MemoryStore`, `FileStore`)
//! - Typed `Storage` facade over fixed keys
//! - Read failures fall back to defaults, write failures are logged

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::settings::Settings;

/// Backend failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Typed access to the game's persisted values
#[derive(Debug)]
pub struct Storage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    const HIGH_SCORE_KEY: &'static str = "block_tower_high_score";
    const SETTINGS_KEY: &'static str = "block_tower_settings";
    const AVATAR_KEY: &'static str = "block_tower_avatar";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saved high score, 0 if none or unreadable
    pub fn high_score(&self) -> u32 {
        match self.store.get_item(Self::HIGH_SCORE_KEY) {
            Ok(Some(value)) => value.trim().parse::<u32>().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed high score {:?}", value);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::error!("Failed to read high score: {}", e);
                0
            }
        }
    }

    /// Store `score` if it beats the saved value; returns whether it was written
    pub fn save_high_score(&mut self, score: u32) -> bool {
        if score <= self.high_score() {
            return false;
        }
        match self
            .store
            .set_item(Self::HIGH_SCORE_KEY, &score.to_string())
        {
            Ok(()) => {
                log::info!("High score saved ({})", score);
                true
            }
            Err(e) => {
                log::error!("Failed to save high score: {}", e);
                false
            }
        }
    }

    /// Saved settings, `None` if never saved or unreadable
    pub fn settings(&self) -> Option<Settings> {
        let json = match self.store.get_item(Self::SETTINGS_KEY) {
            Ok(json) => json?,
            Err(e) => {
                log::error!("Failed to read settings: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring corrupt settings: {}", e);
                None
            }
        }
    }

    pub fn save_settings(&mut self, settings: &Settings) {
        let result = serde_json::to_string(settings)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set_item(Self::SETTINGS_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::error!("Failed to save settings: {}", e),
        }
    }

    pub fn avatar(&self) -> Option<String> {
        self.store
            .get_item(Self::AVATAR_KEY)
            .unwrap_or_else(|e| {
                log::error!("Failed to read avatar: {}", e);
                None
            })
    }

    pub fn save_avatar(&mut self, uri: &str) {
        if let Err(e) = self.store.set_item(Self::AVATAR_KEY, uri) {
            log::error!("Failed to save avatar: {}", e);
        }
    }

    pub fn remove_avatar(&mut self) {
        if let Err(e) = self.store.remove_item(Self::AVATAR_KEY) {
            log::error!("Failed to remove avatar: {}", e);
        }
    }

    /// Wipe everything
    pub fn clear(&mut self) {
        match self.store.clear() {
            Ok(()) => log::info!("Storage cleared"),
            Err(e) => log::error!("Failed to clear storage: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that fails every call
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("read error".into()))
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("write error".into()))
        }
        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("write error".into()))
        }
        fn clear(&mut self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("write error".into()))
        }
    }

    fn storage() -> Storage<MemoryStore> {
        Storage::new(MemoryStore::new())
    }

    #[test]
    fn test_high_score_defaults_to_zero() {
        assert_eq!(storage().high_score(), 0);
    }

    #[test]
    fn test_high_score_roundtrip() {
        let mut storage = storage();
        assert!(storage.save_high_score(150));
        assert_eq!(storage.high_score(), 150);
    }

    #[test]
    fn test_high_score_only_raises() {
        let mut storage = storage();
        storage.save_high_score(100);
        assert!(!storage.save_high_score(50));
        assert_eq!(storage.high_score(), 100);
    }

    #[test]
    fn test_malformed_high_score() {
        let mut store = MemoryStore::new();
        store.set_item("block_tower_high_score", "lots").unwrap();
        assert_eq!(Storage::new(store).high_score(), 0);
    }

    #[test]
    fn test_settings_missing() {
        assert!(storage().settings().is_none());
    }

    #[test]
    fn test_settings_roundtrip_with_avatar() {
        let mut storage = storage();
        let settings = Settings {
            sound_enabled: true,
            music_enabled: false,
            vibration_enabled: true,
            avatar_uri: Some("https://example.com/avatar.png".into()),
        };
        storage.save_settings(&settings);
        assert_eq!(storage.settings(), Some(settings));
    }

    #[test]
    fn test_corrupt_settings_ignored() {
        let mut store = MemoryStore::new();
        store.set_item("block_tower_settings", "{oops").unwrap();
        assert!(Storage::new(store).settings().is_none());
    }

    #[test]
    fn test_avatar() {
        let mut storage = storage();
        assert!(storage.avatar().is_none());
        storage.save_avatar("content://provider/avatar123.png");
        assert_eq!(
            storage.avatar().as_deref(),
            Some("content://provider/avatar123.png")
        );
        storage.remove_avatar();
        assert!(storage.avatar().is_none());
    }

    #[test]
    fn test_clear() {
        let mut storage = storage();
        storage.save_high_score(200);
        storage.save_settings(&Settings::default());
        storage.save_avatar("test://avatar");

        storage.clear();
        assert_eq!(storage.high_score(), 0);
        assert!(storage.settings().is_none());
        assert!(storage.avatar().is_none());
    }

    #[test]
    fn test_broken_backend_degrades() {
        let mut storage = Storage::new(BrokenStore);
        assert_eq!(storage.high_score(), 0);
        assert!(!storage.save_high_score(100));
        assert!(storage.settings().is_none());
        storage.save_settings(&Settings::default());
        assert!(storage.avatar().is_none());
        storage.clear();
    }
}
