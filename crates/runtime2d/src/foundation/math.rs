//! 2D math primitives shared by the physics and object modules.
//!
//! All positions are world-space with X to the right and Y up. Bounding
//! boxes are axis-aligned and stored as min/max corners with inclusive
//! bounds: two boxes sharing an edge count as overlapping.

use nalgebra::Vector2;

/// 2D vector of `f32`, the working type for positions and velocities.
pub type Vec2 = Vector2<f32>;

/// Axis-aligned bounding box with inclusive min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from explicit corners.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a box from a center point and half extents.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Box center point.
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Box half extents (always non-negative for a well-formed box).
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Inclusive overlap test: boxes touching along an edge overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Whether a point lies inside the box (inclusive bounds).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec2::zeros(),
            max: Vec2::zeros(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0));
        let c = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlap_touching_edges_is_inclusive() {
        // Shared right/left edge must count as overlap.
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_from_center_roundtrip() {
        let aabb = Aabb::from_center(Vec2::new(3.0, -1.0), Vec2::new(2.0, 0.5));
        assert_eq!(aabb.min, Vec2::new(1.0, -1.5));
        assert_eq!(aabb.max, Vec2::new(5.0, -0.5));
        assert_eq!(aabb.center(), Vec2::new(3.0, -1.0));
        assert_eq!(aabb.half_extents(), Vec2::new(2.0, 0.5));
    }

    #[test]
    fn test_contains() {
        let aabb = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(aabb.contains(Vec2::new(0.5, 0.5)));
        assert!(aabb.contains(Vec2::new(1.0, 1.0)));
        assert!(!aabb.contains(Vec2::new(1.1, 0.5)));
    }
}
