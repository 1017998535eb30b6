use glam::Vec3;

use crate::{
    math::{bounds::Bounds, distributions::sphere_uv_from_direction},
    ray::Ray,
};

use super::{first_in_range, Shape, SurfaceHit};

/// A sphere centered on the local origin
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        // The direction is a unit vector, so a = 1
        let oc = ray.origin.vec();
        let b_half = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant_quarter = b_half * b_half - c;
        if discriminant_quarter < 0.0 {
            return None;
        }
        let sq = discriminant_quarter.sqrt();
        let t = first_in_range(ray, [-b_half - sq, -b_half + sq])?;

        let position = ray.at(t);
        let normal = position.vec() / self.radius;
        Some(SurfaceHit {
            t,
            position,
            normal,
            uv: sphere_uv_from_direction(normal),
        })
    }

    fn bounds(&self) -> Bounds {
        Bounds::centered(Vec3::splat(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Sphere;
    use crate::{math::point::Point, ray::Ray, shape::Shape};

    #[test]
    fn hit_from_outside() {
        let sphere = Sphere::new(0.5);
        let hit = sphere
            .intersect(&Ray::new(Point::new(-2.0, 0.0, 0.0), Vec3::X))
            .unwrap();
        assert!((hit.t - 1.5).abs() < 1e-5);
        assert!(hit.normal.distance(Vec3::NEG_X) < 1e-5);
    }

    #[test]
    fn hit_from_inside_is_far_side() {
        let sphere = Sphere::new(1.0);
        let hit = sphere.intersect(&Ray::new(Point::ORIGIN, Vec3::Y)).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        // normal still points outwards
        assert!(hit.normal.distance(Vec3::Y) < 1e-5);
    }

    #[test]
    fn miss_and_out_of_range() {
        let sphere = Sphere::new(1.0);
        assert!(sphere
            .intersect(&Ray::new(Point::new(-5.0, 2.0, 0.0), Vec3::X))
            .is_none());
        let short = Ray::new_with_range(Point::new(-5.0, 0.0, 0.0), Vec3::X, 0.0..3.0);
        assert!(sphere.intersect(&short).is_none());
    }
}
