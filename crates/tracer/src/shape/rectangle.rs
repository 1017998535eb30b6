use glam::Vec3;

use crate::{
    math::{bounds::Bounds, point::Point},
    ray::Ray,
};

use super::{disc::plane_y0, Shape, SurfaceHit, Uv};

/// A `width` (along x) by `depth` (along z) rectangle in the local `y = 0` plane, centered on
/// the origin and facing +y
#[derive(Debug, Clone, Copy)]
pub struct Rectangle {
    pub width: f32,
    pub depth: f32,
}

impl Rectangle {
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }
}

impl Shape for Rectangle {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let t = plane_y0(ray)?;
        let Vec3 { x, z, .. } = ray.at(t).vec();
        if x.abs() > self.width / 2.0 || z.abs() > self.depth / 2.0 {
            return None;
        }

        Some(SurfaceHit {
            t,
            position: Point::new(x, 0.0, z),
            normal: Vec3::Y,
            uv: Uv::new(x / self.width + 0.5, z / self.depth + 0.5),
        })
    }

    fn bounds(&self) -> Bounds {
        let half = Vec3::new(self.width / 2.0, 0.0, self.depth / 2.0);
        Bounds::centered(half)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Rectangle;
    use crate::{math::point::Point, ray::Ray, shape::Shape};

    #[test]
    fn uv_spans_unit_square() {
        let rect = Rectangle::new(4.0, 2.0);
        let corner = rect
            .intersect(&Ray::new(Point::new(-1.999, 1.0, -0.999), Vec3::NEG_Y))
            .unwrap();
        assert!(corner.uv.x < 0.01 && corner.uv.y < 0.01);

        let center = rect
            .intersect(&Ray::new(Point::new(0.0, 1.0, 0.0), Vec3::NEG_Y))
            .unwrap();
        assert!((center.uv.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn outside_misses() {
        let rect = Rectangle::new(4.0, 2.0);
        assert!(rect
            .intersect(&Ray::new(Point::new(0.0, 1.0, 1.5), Vec3::NEG_Y))
            .is_none());
    }
}
