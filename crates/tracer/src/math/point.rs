//! Positions, kept apart from directions so the two can't be mixed up.

use std::ops::{Add, Sub};

use glam::Vec3;

/// A position in some frame. Directions and offsets are plain [`Vec3`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(pub Vec3);

impl Point {
    pub const ORIGIN: Point = Point(Vec3::ZERO);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    pub fn vec(self) -> Vec3 {
        self.0
    }

    pub fn distance(self, other: Point) -> f32 {
        self.0.distance(other.0)
    }
}

impl From<Vec3> for Point {
    fn from(v: Vec3) -> Self {
        Point(v)
    }
}

impl Add<Vec3> for Point {
    type Output = Self;

    fn add(self, offset: Vec3) -> Self::Output {
        Point(self.0 + offset)
    }
}

impl Sub<Vec3> for Point {
    type Output = Self;

    fn sub(self, offset: Vec3) -> Self::Output {
        Point(self.0 - offset)
    }
}

/// The offset going from `rhs` to `self`. Points can't be added.
impl Sub for Point {
    type Output = Vec3;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}
