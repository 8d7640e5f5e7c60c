//! Axis-aligned bounding boxes
//!
//! Screen-style coordinates: y grows downward, so `min.y` is the top edge.

use glam::Vec2;

/// Axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Overlap test between a moving body and a static target.
    ///
    /// Horizontal edges must strictly overlap. Vertically, the body's bottom
    /// resting exactly on the target's top edge counts as touching, so a
    /// body standing on a block still overlaps it.
    pub fn overlaps(&self, target: &Aabb) -> bool {
        self.left() < target.right()
            && self.right() > target.left()
            && self.bottom() >= target.top()
            && self.top() < target.bottom()
    }
}
