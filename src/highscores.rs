//! High score tracking
//!
//! The engine keeps a running maximum, but the persisted value is
//! authoritative. `HighScore` remembers the best known score and decides
//! when a finished or running game needs to be written back.

use crate::persistence::{KeyValueStore, Storage};

/// Best known score and whether it still needs saving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u32,
    dirty: bool,
}

impl HighScore {
    /// Start from a previously saved value
    pub fn new(best: u32) -> Self {
        Self { best, dirty: false }
    }

    /// Load the saved value from storage
    pub fn load<S: KeyValueStore>(storage: &Storage<S>) -> Self {
        let best = storage.high_score();
        log::info!("Loaded high score {}", best);
        Self::new(best)
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// True when a new best has not been saved yet
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a score; returns true if it beat the previous best
    pub fn observe(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    /// Write the best score if it changed since the last save.
    ///
    /// Stays dirty when the write fails so a later call can retry.
    pub fn save<S: KeyValueStore>(&mut self, storage: &mut Storage<S>) {
        if !self.dirty {
            return;
        }
        if storage.save_high_score(self.best) || storage.high_score() >= self.best {
            self.dirty = false;
        } else {
            log::warn!("High score {} not persisted, will retry", self.best);
        }
    }
}
