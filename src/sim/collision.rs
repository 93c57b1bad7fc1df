//! Axis-aligned collision primitives
//!
//! Ball and paddles are both boxes anchored at their top-left corner, so
//! every contact in the game reduces to a rectangle overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, `y` grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: rectangles that merely share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Scale a velocity component by `factor`, capping its magnitude at `cap`
#[inline]
pub fn ramp_component(v: f32, factor: f32, cap: f32) -> f32 {
    (v * factor).clamp(-cap, cap)
}
