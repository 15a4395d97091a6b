//! Engine configuration record
//!
//! All numeric policy in the engine is expressed relative to these values.
//! The engine never validates them itself; a driver that accepts user-supplied
//! tuning should call [`GameConfig::validate`] before constructing an engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected by [`GameConfig::validate`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite and not negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("min_block_width ({min}) must be below initial_block_width ({initial})")]
    MinWidthTooLarge { min: f32, initial: f32 },
    #[error("initial_block_width ({width}) does not fit screen_width ({screen})")]
    WiderThanScreen { width: f32, screen: f32 },
    #[error("max_speed ({0}) must be finite and at least 1")]
    MaxSpeedBelowOne(f32),
}

/// Fixed configuration supplied to the engine at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the base block and of the first spawned block
    pub initial_block_width: f32,
    /// Height of every block
    pub block_height: f32,
    /// Overlaps at or below this width end the game
    pub min_block_width: f32,
    /// Play area width
    pub screen_width: f32,
    /// Play area height
    pub screen_height: f32,
    /// Units per tick at speed multiplier 1
    pub base_speed: f32,
    /// Upper clamp for the speed multiplier
    pub max_speed: f32,
    /// Horizontal offset (strictly less than) that counts as a perfect hit
    pub perfect_threshold: f32,
    /// Score step between speed increases
    pub score_threshold: u32,
    /// Multiplier gained per score step
    pub speed_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_block_width: INITIAL_BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            min_block_width: MIN_BLOCK_WIDTH,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            perfect_threshold: PERFECT_THRESHOLD,
            score_threshold: SCORE_THRESHOLD,
            speed_step: SPEED_STEP,
        }
    }
}

impl GameConfig {
    /// Create a configuration for a specific play area size
    pub fn with_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Check the record for values that make engine behavior undefined
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("initial_block_width", self.initial_block_width),
            ("block_height", self.block_height),
            ("min_block_width", self.min_block_width),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("base_speed", self.base_speed),
            ("perfect_threshold", self.perfect_threshold),
            ("score_threshold", self.score_threshold as f32),
        ];
        for (field, value) in positive {
            // Written this way so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.min_block_width >= self.initial_block_width {
            return Err(ConfigError::MinWidthTooLarge {
                min: self.min_block_width,
                initial: self.initial_block_width,
            });
        }
        if self.initial_block_width > self.screen_width {
            return Err(ConfigError::WiderThanScreen {
                width: self.initial_block_width,
                screen: self.screen_width,
            });
        }
        if !(self.max_speed >= 1.0) || !self.max_speed.is_finite() {
            return Err(ConfigError::MaxSpeedBelowOne(self.max_speed));
        }
        // A negative step would slow the block down as the score grows
        if !(self.speed_step >= 0.0) || !self.speed_step.is_finite() {
            return Err(ConfigError::Negative {
                field: "speed_step",
                value: self.speed_step,
            });
        }
        Ok(())
    }

    /// Speed multiplier for a cumulative score (step function, clamped)
    pub fn speed_multiplier_for(&self, score: u32) -> f32 {
        let steps = score / self.score_threshold.max(1);
        (1.0 + steps as f32 * self.speed_step).min(self.max_speed)
    }
}
