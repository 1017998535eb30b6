//! Geometry primitives, expressed in their own local frame.
//!
//! A primitive never knows where it is in the world: the scene moves the ray into the local
//! frame of each instance (see [`crate::math::axis::Axis`]) before calling [`Shape::intersect`].
//!
//! There are two kinds of shapes: explicit ones, whose intersection has a closed form, and
//! [`marched`] ones, defined by a signed distance function and found by sphere marching.

pub mod cuboid;
pub mod disc;
pub mod marched;
pub mod rectangle;
pub mod sphere;

pub use cuboid::Cuboid;
pub use disc::Disc;
pub use marched::Marched;
pub use rectangle::Rectangle;
pub use sphere::Sphere;

use glam::{Vec2, Vec3};

use crate::{
    math::{bounds::Bounds, point::Point},
    ray::Ray,
};

pub type Uv = Vec2;

/// Handle to a shape owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub usize);

/// Where a ray met a shape, in the shape's local frame
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    pub t: f32,
    pub position: Point,
    /// Unit normal pointing out of the shape, regardless of the ray
    pub normal: Vec3,
    pub uv: Uv,
}

/// An abstracted shape to be rendered by raytracing.
pub trait Shape: Sync + Send {
    /// The closest intersection with `t` inside the ray's bounds, if any
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit>;

    /// Local bounding box
    fn bounds(&self) -> Bounds;
}

/// Closest valid root among `candidates`, which must be sorted by increasing `t`
pub(crate) fn first_in_range(ray: &Ray, candidates: [f32; 2]) -> Option<f32> {
    candidates.into_iter().find(|&t| ray.contains(t))
}
