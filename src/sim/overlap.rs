//! Horizontal overlap between a committed block and its support
//!
//! The 1-D counterpart of a collision test: only the x extent matters.

use super::block::Block;

/// Result of intersecting a moving block with the block below it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Left edge of the shared interval
    pub start: f32,
    /// Right edge of the shared interval
    pub end: f32,
    /// `end - start`; negative when the blocks are disjoint
    pub width: f32,
    /// Absolute offset between the two left edges
    pub offset: f32,
}

impl Overlap {
    /// True when the overlap is too thin to stand on
    #[inline]
    pub fn is_miss(&self, min_width: f32) -> bool {
        self.width <= min_width
    }

    /// True when the left edges line up within `threshold`
    #[inline]
    pub fn is_perfect(&self, threshold: f32) -> bool {
        self.offset < threshold
    }
}

/// Compute the x overlap of `moving` on top of `support`
pub fn horizontal_overlap(support: &Block, moving: &Block) -> Overlap {
    let start = support.x.max(moving.x);
    let end = support.right().min(moving.right());
    // Never wider than either block, even after rounding in `right()`
    let width = (end - start).min(support.width).min(moving.width);
    Overlap {
        start,
        end,
        width,
        offset: (support.x - moving.x).abs(),
    }
}
