//! Axis-aligned bounding boxes and the overlap test
//!
//! Boxes are value types in screen-pixel coordinates, recomputed from entity
//! state on every query and never cached.

use serde::{Deserialize, Serialize};

/// An axis-aligned box. Invariant: `left <= right`, `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        debug_assert!(left <= right && top <= bottom);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same box translated by (dx, dy)
    pub fn shifted(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// True unless the boxes are disjoint on either axis. Touching edges count as
/// intersecting. Symmetric, and any box intersects itself.
pub fn intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.right < b.left || b.right < a.left || a.bottom < b.top || b.bottom < a.top)
}
