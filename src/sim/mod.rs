//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - One operation per driver call, no internal scheduling
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod block;
pub mod config;
pub mod engine;
pub mod overlap;
pub mod state;

pub use block::{Block, BlockColor, BlockId, Direction, PALETTE, palette_color};
pub use config::{ConfigError, GameConfig};
pub use engine::GameEngine;
pub use overlap::{Overlap, horizontal_overlap};
pub use state::{GameEvent, GamePhase, GameState};
