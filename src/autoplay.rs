//! Idle/demo mode input
//!
//! A bot that watches the state each tick and decides when to tap. With
//! `skill = 1.0` it commits when the moving block is as close to the top of
//! the tower as one tick of motion allows; lower skill aims at a randomly
//! offset target chosen once per block.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{BlockId, GameState};

/// Deterministic bot input
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    skill: f32,
    screen_width: f32,
    rng: Pcg32,
    /// Block currently being aimed at, and the aim offset for it
    target: Option<(BlockId, f32)>,
}

impl AutoPlayer {
    /// `skill` is clamped to `[0, 1]`
    pub fn new(skill: f32, screen_width: f32, seed: u64) -> Self {
        Self {
            skill: skill.clamp(0.0, 1.0),
            screen_width,
            rng: Pcg32::seed_from_u64(seed),
            target: None,
        }
    }

    pub fn skill(&self) -> f32 {
        self.skill
    }

    /// Should the driver commit on this tick?
    pub fn wants_commit(&mut self, state: &GameState) -> bool {
        if !state.is_playing() {
            self.target = None;
            return false;
        }
        let (Some(top), Some(moving)) = (state.top(), state.current_block.as_ref()) else {
            return false;
        };

        let offset = match self.target {
            Some((id, offset)) if id == moving.id => offset,
            _ => {
                let spread = (1.0 - self.skill) * top.width / 2.0;
                let offset = if spread > 0.0 {
                    self.rng.random_range(-spread..=spread)
                } else {
                    0.0
                };
                self.target = Some((moving.id, offset));
                offset
            }
        };

        // Keep the aim point reachable so the bot always taps eventually
        let max_x = (self.screen_width - moving.width).max(0.0);
        let aim = (top.x + offset).clamp(0.0, max_x);
        let tolerance = (moving.speed / 2.0).max(0.5);
        (moving.x - aim).abs() <= tolerance
    }
}
