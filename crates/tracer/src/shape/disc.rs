use glam::Vec3;

use crate::{
    math::{bounds::Bounds, point::Point},
    ray::Ray,
};

use super::{Shape, SurfaceHit, Uv};

/// Parametric `t` where the ray crosses the local `y = 0` plane, if it does within its bounds
pub(crate) fn plane_y0(ray: &Ray) -> Option<f32> {
    if ray.direction.y.abs() < 1e-8 {
        return None;
    }
    let t = -ray.origin.vec().y / ray.direction.y;
    ray.contains(t).then_some(t)
}

/// A flat disc in the local `y = 0` plane, facing +y
#[derive(Debug, Clone, Copy)]
pub struct Disc {
    pub radius: f32,
}

impl Disc {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Shape for Disc {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let t = plane_y0(ray)?;
        let Vec3 { x, z, .. } = ray.at(t).vec();
        if x * x + z * z > self.radius * self.radius {
            return None;
        }

        Some(SurfaceHit {
            t,
            position: Point::new(x, 0.0, z),
            normal: Vec3::Y,
            uv: Uv::new(x, z),
        })
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(
            Point::new(-self.radius, 0.0, -self.radius),
            Point::new(self.radius, 0.0, self.radius),
        )
    }
}
