//! Conversions between the editor's world frame and the gizmo's local frame.
//!
//! The gizmo's handles live in an un-rotated local frame; the gizmo itself is
//! drawn rotated by its current angle. Angles are in degrees, clockwise
//! positive, matching the host editor's convention.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either world or gizmo-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Point) -> f64 {
        let d = self - other;
        d.x * d.x + d.y * d.y
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point { x: (self.x + other.x) / 2.0, y: (self.y + other.y) / 2.0 }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Convert a world-space point into the gizmo's local frame.
#[must_use]
pub fn to_local(p: Point, angle_deg: f64) -> Point {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Point { x: cos * p.x - sin * p.y, y: sin * p.x + cos * p.y }
}

/// Convert a gizmo-local point back into world space.
#[must_use]
pub fn to_world(p: Point, angle_deg: f64) -> Point {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Point { x: cos * p.x + sin * p.y, y: -sin * p.x + cos * p.y }
}
