use glam::Vec3;

use crate::{math::bounds::Bounds, ray::Ray};

use super::{first_in_range, Shape, SurfaceHit, Uv};

/// An axis aligned box centered on the local origin
#[derive(Debug, Clone, Copy)]
pub struct Cuboid {
    pub half_size: Vec3,
}

impl Cuboid {
    pub fn new(half_size: Vec3) -> Self {
        Self { half_size }
    }

    /// Outward normal and face coordinates of a point on the surface
    fn face(&self, p: Vec3) -> (Vec3, Uv) {
        let scaled = p / self.half_size;
        let a = scaled.abs();
        let to_unit = |u: f32, v: f32| Uv::new(0.5 * (u + 1.0), 0.5 * (v + 1.0));
        if a.x >= a.y && a.x >= a.z {
            (Vec3::X * scaled.x.signum(), to_unit(scaled.z, scaled.y))
        } else if a.y >= a.z {
            (Vec3::Y * scaled.y.signum(), to_unit(scaled.x, scaled.z))
        } else {
            (Vec3::Z * scaled.z.signum(), to_unit(scaled.x, scaled.y))
        }
    }
}

impl Shape for Cuboid {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let inv = ray.direction.recip();
        let t0 = (-self.half_size - ray.origin.vec()) * inv;
        let t1 = (self.half_size - ray.origin.vec()) * inv;
        let near = t0.min(t1).max_element();
        let far = t0.max(t1).min_element();
        if near.is_nan() || far.is_nan() || near > far {
            return None;
        }

        let t = first_in_range(ray, [near, far])?;
        let position = ray.at(t);
        let (normal, uv) = self.face(position.vec());
        Some(SurfaceHit {
            t,
            position,
            normal,
            uv,
        })
    }

    fn bounds(&self) -> Bounds {
        Bounds::centered(self.half_size)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Cuboid;
    use crate::{math::point::Point, ray::Ray, shape::Shape};

    #[test]
    fn faces() {
        let cube = Cuboid::new(Vec3::new(1.0, 2.0, 3.0));
        let hit = cube
            .intersect(&Ray::new(Point::new(0.0, 10.0, 0.0), Vec3::NEG_Y))
            .unwrap();
        assert!((hit.t - 8.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);

        let hit = cube
            .intersect(&Ray::new(Point::new(-5.0, 0.5, 0.5), Vec3::X))
            .unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn from_inside_hits_exit_face() {
        let cube = Cuboid::new(Vec3::ONE);
        let hit = cube.intersect(&Ray::new(Point::ORIGIN, Vec3::Z)).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn miss() {
        let cube = Cuboid::new(Vec3::ONE);
        assert!(cube
            .intersect(&Ray::new(Point::new(-5.0, 3.0, 0.0), Vec3::X))
            .is_none());
    }
}
