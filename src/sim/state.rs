//! Game state and core simulation types
//!
//! `GameState` is the full authoritative snapshot owned by the engine.

use serde::{Deserialize, Serialize};

use super::block::Block;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game in progress, no blocks
    #[default]
    Idle,
    /// Tower growing, one block oscillating
    Playing,
    /// Last commit missed; tower frozen for display
    GameOver,
}

/// Outcome of the most recent mutating engine operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game began
    Started,
    /// The moving block was trimmed and added to the tower
    Placed {
        overlap: f32,
        perfect: bool,
        score: u32,
    },
    /// The overlap was too small and the game ended
    Missed { overlap: f32 },
    /// The engine returned to Idle
    Reset,
}

/// Complete game snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    /// Best score seen by this engine (merged with the persisted value by the driver)
    pub high_score: u32,
    pub phase: GamePhase,
    /// Settled blocks, bottom first; index 0 is the base
    pub tower: Vec<Block>,
    /// The oscillating block, present only while playing
    pub current_block: Option<Block>,
    pub speed_multiplier: f32,
    /// Consecutive perfect commits
    pub streak: u32,
    /// Width for the next spawned block
    pub last_block_width: f32,
}

impl GameState {
    /// Idle state with an empty tower
    pub fn idle(initial_block_width: f32, high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
            phase: GamePhase::Idle,
            tower: Vec::new(),
            current_block: None,
            speed_multiplier: 1.0,
            streak: 0,
            last_block_width: initial_block_width,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Topmost settled block
    pub fn top(&self) -> Option<&Block> {
        self.tower.last()
    }

    /// Number of blocks stacked on the base
    pub fn height(&self) -> usize {
        self.tower.len().saturating_sub(1)
    }

    /// Count of blocks flagged as moving (exactly one during play)
    pub fn moving_count(&self) -> usize {
        self.tower
            .iter()
            .chain(self.current_block.iter())
            .filter(|b| b.is_moving)
            .count()
    }
}
