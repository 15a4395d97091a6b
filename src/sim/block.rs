//! Tower blocks
//!
//! A block is an axis-aligned rectangle in screen space. `y` grows downward,
//! so the tower grows toward smaller `y` values.

use serde::{Deserialize, Serialize};

/// Unique block identity, allocated in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u64);

/// Horizontal travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Travelling toward x = 0
    Left,
    /// Travelling toward x = screen width
    Right,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit sign of horizontal velocity
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Block fill color, as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockColor(pub u32);

impl BlockColor {
    /// CSS-style hex string (`#rrggbb`)
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// Fixed block palette, indexed by tower height
pub const PALETTE: [BlockColor; 6] = [
    BlockColor(0x3498db),
    BlockColor(0xe74c3c),
    BlockColor(0x2ecc71),
    BlockColor(0xf1c40f),
    BlockColor(0x9b59b6),
    BlockColor(0x1abc9c),
];

/// Palette entry for a block spawned on a tower of `tower_len` blocks
pub fn palette_color(tower_len: usize) -> BlockColor {
    PALETTE[tower_len % PALETTE.len()]
}

/// A block, either settled in the tower or currently oscillating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub width: f32,
    pub height: f32,
    pub color: BlockColor,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal speed magnitude (0 once settled)
    pub speed: f32,
    pub is_moving: bool,
    pub direction: Direction,
    /// Set when the block was committed within the perfect tolerance
    pub perfect_hit: bool,
}

impl Block {
    /// Right edge (`x + width`)
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Move one tick along the current direction, bouncing off `[0, bound]`.
    ///
    /// The block is clamped onto the boundary on the tick it reaches or
    /// crosses it, and the direction flips on that same tick.
    pub fn step(&mut self, bound: f32) {
        self.x += self.speed * self.direction.sign();
        match self.direction {
            Direction::Right if self.right() >= bound => {
                self.x = bound - self.width;
                self.direction = self.direction.flipped();
            }
            Direction::Left if self.x <= 0.0 => {
                self.x = 0.0;
                self.direction = self.direction.flipped();
            }
            _ => {}
        }
    }
}
