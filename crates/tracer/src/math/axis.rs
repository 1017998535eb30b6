//! Rigid transforms between a primitive's local frame and the world.

use glam::{EulerRot, Mat3, Vec3};

use super::{bounds::Bounds, point::Point};
use crate::ray::Ray;

/// An orthonormal frame placed somewhere in the world: an origin plus a rotation.
///
/// The columns of `basis` are the local x, y and z axes expressed in world space.
/// As there is no scaling, distances along a ray are the same in both frames, which
/// lets hits found in different local frames be compared by `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub origin: Point,
    pub basis: Mat3,
}

impl Default for Axis {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Axis {
    pub const IDENTITY: Self = Self {
        origin: Point::ORIGIN,
        basis: Mat3::IDENTITY,
    };

    pub fn translation(origin: Point) -> Self {
        Self {
            origin,
            basis: Mat3::IDENTITY,
        }
    }

    /// Rotate around z, then y, then x (angles in radians) and move to `origin`
    pub fn euler_zyx(z: f32, y: f32, x: f32, origin: Point) -> Self {
        Self {
            origin,
            basis: Mat3::from_euler(EulerRot::ZYX, z, y, x),
        }
    }

    /// A frame at `origin` whose local -z axis points at `target`, with local +y as close to
    /// `up` as possible.
    pub fn look_at(origin: Point, target: Point, up: Vec3) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        Self {
            origin,
            basis: Mat3::from_cols(right, up, -forward),
        }
    }

    /// world -> local
    pub fn transform_to(&self, p: Point) -> Point {
        Point(self.rotate_to(p - self.origin))
    }

    /// local -> world
    pub fn transform_from(&self, p: Point) -> Point {
        self.origin + self.rotate_from(p.vec())
    }

    /// world -> local, for directions
    pub fn rotate_to(&self, v: Vec3) -> Vec3 {
        self.basis.transpose() * v
    }

    /// local -> world, for directions
    pub fn rotate_from(&self, v: Vec3) -> Vec3 {
        self.basis * v
    }

    pub fn ray_to(&self, ray: &Ray) -> Ray {
        Ray {
            origin: self.transform_to(ray.origin),
            direction: self.rotate_to(ray.direction),
            bounds: ray.bounds,
        }
    }

    pub fn ray_from(&self, ray: &Ray) -> Ray {
        Ray {
            origin: self.transform_from(ray.origin),
            direction: self.rotate_from(ray.direction),
            bounds: ray.bounds,
        }
    }

    /// World space box enclosing the local box `local`
    pub fn bounds_from(&self, local: &Bounds) -> Bounds {
        if local.is_empty() {
            return Bounds::EMPTY;
        }
        local
            .corners()
            .into_iter()
            .fold(Bounds::EMPTY, |acc, corner| {
                acc.grow(self.transform_from(corner))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Vec3;

    use super::Axis;
    use crate::{
        math::{bounds::Bounds, point::Point},
        ray::Ray,
    };

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn point_round_trip() {
        let axis = Axis::euler_zyx(0.3, -1.2, 0.7, Point::new(4.0, -2.0, 1.0));
        let p = Point::new(1.0, 2.0, 3.0);
        assert!(close(axis.transform_from(axis.transform_to(p)).vec(), p.vec()));
        assert!(close(axis.transform_to(axis.transform_from(p)).vec(), p.vec()));
    }

    #[test]
    fn translation_only_moves_points() {
        let axis = Axis::translation(Point::new(1.0, 2.0, 3.0));
        assert!(close(axis.transform_from(Point::ORIGIN).vec(), Vec3::new(1.0, 2.0, 3.0)));
        assert!(close(axis.rotate_from(Vec3::X), Vec3::X));
    }

    #[test]
    fn rotation_around_z() {
        let axis = Axis::euler_zyx(FRAC_PI_2, 0.0, 0.0, Point::ORIGIN);
        assert!(close(axis.rotate_from(Vec3::X), Vec3::Y));
        assert!(close(axis.rotate_to(Vec3::Y), Vec3::X));
    }

    #[test]
    fn look_at_points_minus_z_at_target() {
        let axis = Axis::look_at(Point::new(0.0, 0.0, 5.0), Point::ORIGIN, Vec3::Y);
        assert!(close(axis.rotate_from(Vec3::NEG_Z), Vec3::NEG_Z));
        assert!(close(axis.rotate_from(Vec3::Y), Vec3::Y));
        assert!(axis.basis.determinant() > 0.0);
    }

    #[test]
    fn ray_distances_are_preserved() {
        let axis = Axis::euler_zyx(0.5, 0.5, 0.5, Point::new(10.0, 0.0, 0.0));
        let ray = Ray::new(Point::new(1.0, 1.0, 1.0), Vec3::new(1.0, 2.0, -1.0));
        let local = axis.ray_to(&ray);
        assert!(close(axis.transform_from(local.at(3.0)).vec(), ray.at(3.0).vec()));
    }

    #[test]
    fn rotated_bounds_contain_rotated_corners() {
        let axis = Axis::euler_zyx(0.8, 0.1, 0.0, Point::new(0.0, 5.0, 0.0));
        let local = Bounds::from_points(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let world = axis.bounds_from(&local);
        for corner in local.corners() {
            assert!(world.padded(1e-5).contains(axis.transform_from(corner)));
        }
    }
}
