use std::ops::Range;

use crate::math::point::Point;

use super::math::vec::Vec3;

/// A half line, `origin + t * direction` for `t` in `bounds`.
///
/// The direction is always normalized, so `t` is a distance.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vec3,
    pub bounds: (f32, f32),
}

impl Ray {
    pub fn new(origin: Point, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            bounds: (0.0, f32::INFINITY),
        }
    }
    pub fn new_with_range(origin: Point, direction: Vec3, range: Range<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            bounds: (range.start, range.end),
        }
    }

    /// Whether `t` is a valid hit distance: strictly after the start and strictly before the end.
    ///
    /// The end is excluded so that shrinking it to the closest hit so far rejects ties.
    pub fn contains(&self, t: f32) -> bool {
        t > self.bounds.0 && t < self.bounds.1
    }

    pub fn at(&self, t: f32) -> Point {
        self.origin + t * self.direction
    }

    /// The same ray with its origin pushed `eps` along its direction
    pub fn offset(self, eps: f32) -> Self {
        Self {
            origin: self.at(eps),
            ..self
        }
    }
}
