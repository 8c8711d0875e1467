//! Rectangle helper for control layout
//!
//! Only what hit testing and layer placement need: containment, centering
//! and re-positioning. Everything is in the control's local space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (position is the top-left corner)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Rectangle anchored at the origin
    pub const fn from_size(size: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            size,
        }
    }

    /// Inclusive of the top-left edge, exclusive of the bottom-right edge
    pub fn has_point(&self, point: Vec2) -> bool {
        let end = self.position + self.size;
        point.x >= self.position.x && point.y >= self.position.y && point.x < end.x && point.y < end.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Length of the shorter side
    pub fn min_side(&self) -> f32 {
        self.size.x.min(self.size.y)
    }

    /// Same size, centered inside `outer` (which is anchored at the origin)
    pub fn centered_in(size: Vec2, outer: Vec2) -> Self {
        Self::new((outer - size) * 0.5, size)
    }

    /// Same size, re-positioned so its center lands on `center`
    pub fn moved_to(&self, center: Vec2) -> Self {
        Self::new(center - self.size * 0.5, self.size)
    }
}
