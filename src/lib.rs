//! Block Tower - a single-screen block stacking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game-state engine (overlap, scoring, speed policy)
//! - `session`: Fixed-timestep driver tying the engine to storage and feedback
//! - `autoplay`: Bot input for headless runs
//! - `persistence`: Key-value storage for high score and settings
//! - `platform`: Device compatibility checks
//! - `feedback`: Vibration/sound cues

pub mod autoplay;
pub mod feedback;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use session::{Screen, Session};
pub use settings::Settings;
pub use sim::{GameConfig, GameEngine, GameState};

/// Game configuration constants
pub mod consts {
    /// Driver tick period in seconds (~60 steps per second)
    pub const TICK_DT: f32 = 0.016;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default play area
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Block defaults
    pub const INITIAL_BLOCK_WIDTH: f32 = 200.0;
    pub const BLOCK_HEIGHT: f32 = 50.0;
    pub const MIN_BLOCK_WIDTH: f32 = 40.0;
    /// Base block sits this many block heights above the bottom edge
    pub const BASE_ROWS_FROM_BOTTOM: f32 = 4.0;
    /// Row where new blocks start oscillating
    pub const SPAWN_Y: f32 = 100.0;

    /// Movement
    pub const BASE_SPEED: f32 = 4.0;
    pub const MAX_SPEED: f32 = 12.0;
    /// Score step between speed increases
    pub const SCORE_THRESHOLD: u32 = 5;
    /// Multiplier gained per score step (20%)
    pub const SPEED_STEP: f32 = 0.2;

    /// Scoring
    pub const PERFECT_THRESHOLD: f32 = 10.0;
    pub const NORMAL_POINTS: u32 = 1;
    pub const PERFECT_POINTS: u32 = 3;
}
