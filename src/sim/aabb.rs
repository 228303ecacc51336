//! Axis-aligned bounding boxes
//!
//! All gameplay collision is a 2D box overlap in normalized device space.
//! Bounds are inclusive, so touching boxes overlap, and zero-area boxes are
//! valid (a point test is just a degenerate box).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::DEATH_ZONE_HALF_EXTENT;

/// Anything with an axis-aligned box
pub trait Aabb {
    fn min(&self) -> Vec3;
    fn max(&self) -> Vec3;

    fn bounds(&self) -> Bounds {
        Bounds::new(self.min(), self.max())
    }
}

/// A plain box value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Flat box of `width` x `height` centered on `center`
    pub fn centered(center: Vec3, width: f32, height: f32) -> Self {
        let half = Vec3::new(width / 2.0, height / 2.0, 0.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Zero-area box at a point
    pub fn point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }
}

impl Aabb for Bounds {
    fn min(&self) -> Vec3 {
        self.min
    }

    fn max(&self) -> Vec3 {
        self.max
    }

    fn bounds(&self) -> Bounds {
        *self
    }
}

/// The visible play field
pub const SCREEN: Bounds = Bounds::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));

/// Central area where lingering invites a death asteroid
pub const DEATH_ZONE: Bounds = Bounds::new(
    Vec3::new(-DEATH_ZONE_HALF_EXTENT, -DEATH_ZONE_HALF_EXTENT, 0.0),
    Vec3::new(DEATH_ZONE_HALF_EXTENT, DEATH_ZONE_HALF_EXTENT, 0.0),
);

/// XY overlap test, Z ignored
pub fn overlaps_2d<A: Aabb + ?Sized, B: Aabb + ?Sized>(a: &A, b: &B) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
}

/// XYZ overlap test
pub fn overlaps_3d<A: Aabb + ?Sized, B: Aabb + ?Sized>(a: &A, b: &B) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    overlaps_2d(a, b) && a_min.z <= b_max.z && a_max.z >= b_min.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touching_boxes_overlap() {
        let a = Bounds::centered(Vec3::ZERO, 1.0, 1.0);
        let b = Bounds::centered(Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0);
        assert!(overlaps_2d(&a, &b));

        let c = Bounds::centered(Vec3::new(1.01, 0.0, 0.0), 1.0, 1.0);
        assert!(!overlaps_2d(&a, &c));
    }

    #[test]
    fn test_2d_ignores_z_but_3d_does_not() {
        let a = Bounds::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let b = Bounds::new(Vec3::new(0.5, 0.5, 5.0), Vec3::new(1.5, 1.5, 6.0));
        assert!(overlaps_2d(&a, &b));
        assert!(!overlaps_3d(&a, &b));
    }

    #[test]
    fn test_point_inside_screen() {
        assert!(overlaps_2d(&Bounds::point(Vec3::new(0.3, -0.9, 0.0)), &SCREEN));
        assert!(overlaps_2d(&Bounds::point(Vec3::new(1.0, 1.0, 0.0)), &SCREEN));
        assert!(!overlaps_2d(&Bounds::point(Vec3::new(1.001, 0.0, 0.0)), &SCREEN));
    }

    #[test]
    fn test_death_zone_extent() {
        assert!(overlaps_2d(&Bounds::point(Vec3::new(0.45, 0.45, 0.0)), &DEATH_ZONE));
        assert!(!overlaps_2d(&Bounds::point(Vec3::new(0.46, 0.0, 0.0)), &DEATH_ZONE));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -2.0f32..2.0, ay in -2.0f32..2.0, aw in 0.0f32..1.0,
            bx in -2.0f32..2.0, by in -2.0f32..2.0, bw in 0.0f32..1.0,
        ) {
            let a = Bounds::centered(Vec3::new(ax, ay, 0.0), aw, aw);
            let b = Bounds::centered(Vec3::new(bx, by, 0.0), bw, bw);
            prop_assert_eq!(overlaps_2d(&a, &b), overlaps_2d(&b, &a));
        }

        #[test]
        fn box_overlaps_itself(x in -2.0f32..2.0, y in -2.0f32..2.0, w in 0.0f32..1.0) {
            let a = Bounds::centered(Vec3::new(x, y, 0.0), w, w);
            prop_assert!(overlaps_2d(&a, &a));
        }
    }
}
