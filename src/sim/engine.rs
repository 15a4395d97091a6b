//! Game-state engine
//!
//! Owns the single authoritative `GameState` and advances it through
//! `start`, `advance`, `commit` and `reset`. Every operation is synchronous
//! and deterministic given the engine seed; calling `advance` or `commit`
//! outside of play is a no-op.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::block::{Block, BlockId, Direction, PALETTE, palette_color};
use super::config::GameConfig;
use super::overlap::horizontal_overlap;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{BASE_ROWS_FROM_BOTTOM, NORMAL_POINTS, PERFECT_POINTS, SPAWN_Y};

/// The stacking game engine
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: Pcg32,
    /// Next block id; never reset so ids stay unique across games
    next_id: u64,
    last_event: Option<GameEvent>,
}

impl GameEngine {
    /// Create an idle engine. The seed drives spawn directions only.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let state = GameState::idle(config.initial_block_width, 0);
        Self {
            config,
            state,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            last_event: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Borrow the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state, detached from the engine
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Event recorded by the most recent start, commit or reset
    pub fn last_event(&self) -> Option<GameEvent> {
        self.last_event
    }

    /// Raise the engine's high score to at least `stored`
    pub fn merge_high_score(&mut self, stored: u32) {
        self.state.high_score = self.state.high_score.max(stored);
    }

    fn next_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Begin a new game (also used for restart from GameOver)
    pub fn start(&mut self) -> &GameState {
        let id = self.next_block_id();
        let cfg = &self.config;
        let base = Block {
            id,
            width: cfg.initial_block_width,
            height: cfg.block_height,
            color: PALETTE[0],
            x: (cfg.screen_width - cfg.initial_block_width) / 2.0,
            y: cfg.screen_height - cfg.block_height * BASE_ROWS_FROM_BOTTOM,
            speed: 0.0,
            is_moving: false,
            direction: Direction::Right,
            perfect_hit: false,
        };

        let high_score = self.state.high_score;
        self.state = GameState {
            phase: GamePhase::Playing,
            tower: vec![base],
            ..GameState::idle(self.config.initial_block_width, high_score)
        };
        self.state.current_block = Some(self.spawn_block());
        self.last_event = Some(GameEvent::Started);

        log::info!("Game started (high score {})", high_score);
        &self.state
    }

    /// Advance the moving block by one tick
    pub fn advance(&mut self) -> &GameState {
        if !self.state.is_playing() {
            return &self.state;
        }
        let bound = self.config.screen_width;
        if let Some(block) = self.state.current_block.as_mut() {
            block.step(bound);
        }
        &self.state
    }

    /// Commit the moving block onto the tower
    pub fn commit(&mut self) -> &GameState {
        if !self.state.is_playing() {
            return &self.state;
        }
        let (Some(support), Some(moving)) = (self.state.top(), self.state.current_block.as_ref())
        else {
            return &self.state;
        };

        let overlap = horizontal_overlap(support, moving);
        if overlap.is_miss(self.config.min_block_width) {
            self.state.phase = GamePhase::GameOver;
            self.state.current_block = None;
            self.last_event = Some(GameEvent::Missed {
                overlap: overlap.width,
            });
            log::info!(
                "Game over: overlap {:.1} at score {}",
                overlap.width,
                self.state.score
            );
            return &self.state;
        }

        let perfect = overlap.is_perfect(self.config.perfect_threshold);
        let settled = Block {
            width: overlap.width,
            x: overlap.start,
            y: support.y - self.config.block_height,
            speed: 0.0,
            is_moving: false,
            perfect_hit: perfect,
            ..moving.clone()
        };

        let state = &mut self.state;
        if perfect {
            state.score += PERFECT_POINTS;
            state.streak += 1;
        } else {
            state.score += NORMAL_POINTS;
            state.streak = 0;
        }
        state.high_score = state.high_score.max(state.score);
        state.tower.push(settled);
        state.speed_multiplier = self.config.speed_multiplier_for(state.score);
        state.last_block_width = overlap.width;

        log::debug!(
            "Placed block {}: width {:.1}, perfect {}, score {}, streak {}",
            state.tower.len() - 1,
            overlap.width,
            perfect,
            state.score,
            state.streak
        );

        self.last_event = Some(GameEvent::Placed {
            overlap: overlap.width,
            perfect,
            score: self.state.score,
        });
        self.state.current_block = Some(self.spawn_block());
        &self.state
    }

    /// Return to Idle, keeping the high score
    pub fn reset(&mut self) -> &GameState {
        self.state = GameState::idle(self.config.initial_block_width, self.state.high_score);
        self.last_event = Some(GameEvent::Reset);
        &self.state
    }

    /// Build the next oscillating block from the current width and multiplier
    fn spawn_block(&mut self) -> Block {
        let direction = if self.rng.random_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        };
        let width = self.state.last_block_width;
        // Start at the edge the block sweeps away from
        let x = match direction {
            Direction::Right => 0.0,
            Direction::Left => self.config.screen_width - width,
        };
        Block {
            id: self.next_block_id(),
            width,
            height: self.config.block_height,
            color: palette_color(self.state.tower.len()),
            x,
            y: SPAWN_Y,
            speed: self.config.base_speed * self.state.speed_multiplier,
            is_moving: true,
            direction,
            perfect_hit: false,
        }
    }
}
