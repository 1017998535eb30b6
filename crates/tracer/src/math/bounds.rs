use glam::Vec3;

use crate::ray::Ray;

use super::point::Point;

/// Axis Aligned Bounding Box
///
/// An empty box has `min > max` on every axis, so that its union with anything is the other
/// operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds {
    pub const EMPTY: Self = Self {
        min: Point(Vec3::splat(f32::INFINITY)),
        max: Point(Vec3::splat(f32::NEG_INFINITY)),
    };

    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min: Point(a.vec().min(b.vec())),
            max: Point(a.vec().max(b.vec())),
        }
    }

    /// A cube of half side `half` centered on the origin
    pub fn centered(half: Vec3) -> Self {
        Self::from_points(Point(-half), Point(half))
    }

    pub fn is_empty(&self) -> bool {
        self.min.vec().cmpgt(self.max.vec()).any()
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: Point(self.min.vec().min(other.min.vec())),
            max: Point(self.max.vec().max(other.max.vec())),
        }
    }

    pub fn grow(&self, p: Point) -> Bounds {
        Bounds {
            min: Point(self.min.vec().min(p.vec())),
            max: Point(self.max.vec().max(p.vec())),
        }
    }

    pub fn extent(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn centroid(&self) -> Point {
        Point((self.min.vec() + self.max.vec()) * 0.5)
    }

    /// Index of the longest side (0 for x, 1 for y, 2 for z)
    pub fn dominant_axis(&self) -> usize {
        let e = self.extent();
        if e.x >= e.y && e.x >= e.z {
            0
        } else if e.y >= e.z {
            1
        } else {
            2
        }
    }

    pub fn padded(&self, eps: f32) -> Bounds {
        if self.is_empty() {
            return *self;
        }
        Bounds {
            min: self.min - Vec3::splat(eps),
            max: self.max + Vec3::splat(eps),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.vec().cmpge(self.min.vec()).all() && p.vec().cmple(self.max.vec()).all()
    }

    pub fn corners(&self) -> [Point; 8] {
        let (a, b) = (self.min.vec(), self.max.vec());
        [
            Point::new(a.x, a.y, a.z),
            Point::new(b.x, a.y, a.z),
            Point::new(a.x, b.y, a.z),
            Point::new(b.x, b.y, a.z),
            Point::new(a.x, a.y, b.z),
            Point::new(b.x, a.y, b.z),
            Point::new(a.x, b.y, b.z),
            Point::new(b.x, b.y, b.z),
        ]
    }

    /// Slab test. Returns the parametric interval of the ray inside the box, clipped to the
    /// ray's own bounds.
    ///
    /// An axis-parallel ray lying exactly on a slab plane yields NaN for that axis; `f32::max`
    /// and `f32::min` drop NaN operands so that axis is simply ignored.
    pub fn entry(&self, ray: &Ray) -> Option<(f32, f32)> {
        if self.is_empty() {
            return None;
        }
        let inv = ray.direction.recip();
        let t0 = (self.min - ray.origin) * inv;
        let t1 = (self.max - ray.origin) * inv;

        let near = t0.min(t1);
        let far = t0.max(t1);

        let t_min = ray.bounds.0.max(near.x).max(near.y).max(near.z);
        let t_max = ray.bounds.1.min(far.x).min(far.y).min(far.z);

        (t_min <= t_max).then_some((t_min, t_max))
    }

    pub fn hit(&self, ray: &Ray) -> bool {
        self.entry(ray).is_some()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Bounds;
    use crate::{math::point::Point, ray::Ray};

    fn unit() -> Bounds {
        Bounds::from_points(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn empty_is_neutral_for_union() {
        let b = unit();
        assert!(Bounds::EMPTY.is_empty());
        assert_eq!(Bounds::EMPTY.union(&b), b);
        assert_eq!(Bounds::EMPTY.extent(), Vec3::ZERO);
    }

    #[test]
    fn from_points_orders_corners() {
        let b = Bounds::from_points(Point::new(1.0, -2.0, 3.0), Point::new(-1.0, 2.0, 0.0));
        assert_eq!(b.min, Point::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, Point::new(1.0, 2.0, 3.0));
        assert_eq!(b.dominant_axis(), 1);
    }

    #[test]
    fn ray_through_box_hits() {
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vec3::Z);
        let (t0, t1) = unit().entry(&ray).unwrap();
        assert!((t0 - 4.0).abs() < 1e-5);
        assert!((t1 - 6.0).abs() < 1e-5);
    }

    #[test]
    fn ray_starting_inside_enters_at_tmin() {
        let ray = Ray::new(Point::ORIGIN, Vec3::X);
        let (t0, _) = unit().entry(&ray).unwrap();
        assert_eq!(t0, 0.0);
    }

    #[test]
    fn ray_missing_box() {
        let ray = Ray::new(Point::new(0.0, 3.0, -5.0), Vec3::Z);
        assert!(!unit().hit(&ray));

        let away = Ray::new(Point::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!unit().hit(&away));
    }

    #[test]
    fn ray_bounds_are_honoured() {
        let ray = Ray::new_with_range(Point::new(0.0, 0.0, -5.0), Vec3::Z, 0.0..3.0);
        assert!(!unit().hit(&ray));
    }

    #[test]
    fn ray_on_slab_plane_does_not_panic() {
        let ray = Ray::new(Point::new(1.0, 0.0, -5.0), Vec3::Z);
        // Only checks that degenerate slabs don't poison the result with NaN
        let _ = unit().entry(&ray);
        let inside = Ray::new(Point::new(0.5, 0.0, -5.0), Vec3::Z);
        assert!(unit().hit(&inside));
    }
}
