//! Collision tests for the pool
//!
//! Collectibles, tools, and the station use circular reach tests; obstacles
//! use axis-aligned box overlap against the astronaut's square footprint.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::distance;

/// Axis-aligned rectangle anchored at its top-left corner (screen space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap; rectangles that only share an edge do not touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min, self.max());
        let (b_min, b_max) = (other.min, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// Two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    distance(a, b) < a_radius + b_radius
}

/// Point lies within `reach` of the rectangle's centre
#[inline]
pub fn within_reach_of(point: Vec2, rect: &Rect, reach: f32) -> bool {
    distance(point, rect.center()) < reach
}

/// Clamp a point to the area shrunk by `margin` on every side
pub fn clamp_to_area(pos: Vec2, area: Vec2, margin: f32) -> Vec2 {
    let lo = Vec2::splat(margin);
    // Degenerate areas collapse onto the margin instead of inverting the range
    let hi = (area - Vec2::splat(margin)).max(lo);
    pos.clamp(lo, hi)
}
