//! Implicit surfaces found by sphere marching.
//!
//! A surface is the zero set of a [`SignedDistance`]: negative inside, positive outside, and
//! ideally never larger than the true distance to the surface. Functions that overestimate it
//! (displacements, fractal distance estimators) are still handled: when two consecutive steps
//! land on opposite sides of the surface the step is halved, so the march converges back
//! instead of tunneling through.

pub mod sdf;

pub use sdf::{Anonymous, DisplacedSphere, Mandelbulb, SdfRoundBox, SdfSphere, SdfTorus};

use glam::Vec3;

use crate::{counter, math::bounds::Bounds, ray::Ray};

use super::{Shape, SurfaceHit};
use crate::math::distributions::sphere_uv_from_direction;

pub const MAX_STEPS: usize = 1000;
/// Distance under which the march is considered on the surface
pub const SURFACE_EPSILON: f32 = 1e-5;
/// Step of the central differences used for normals
pub const NORMAL_EPSILON: f32 = 1e-4;

pub trait SignedDistance: Send + Sync {
    fn distance(&self, p: Vec3) -> f32;

    /// A box, in the same frame as `distance`, that contains the whole surface
    fn bounds(&self) -> Bounds;
}

#[derive(Debug, Clone, Copy)]
pub struct MarchResult {
    pub hit: bool,
    /// Where the march stopped
    pub point: Vec3,
    /// Unit outward normal at `point`, zero on a miss
    pub normal: Vec3,
    /// On a hit, whether the ray started inside the surface. On a miss, which side of the
    /// surface the march was last on.
    pub inside: bool,
}

/// Gradient of `sdf` at `p`, by central differences
pub fn marched_normal<S: SignedDistance + ?Sized>(p: Vec3, sdf: &S) -> Vec3 {
    let e = NORMAL_EPSILON;
    let dx = sdf.distance(p + Vec3::X * e) - sdf.distance(p - Vec3::X * e);
    let dy = sdf.distance(p + Vec3::Y * e) - sdf.distance(p - Vec3::Y * e);
    let dz = sdf.distance(p + Vec3::Z * e) - sdf.distance(p - Vec3::Z * e);
    Vec3::new(dx, dy, dz).normalize_or_zero()
}

/// March along `ray` from its origin until the surface of `sdf` is reached.
///
/// Gives up as soon as the distance to the surface exceeds `max_distance`, or after
/// [`MAX_STEPS`] steps.
pub fn marched_trace<S: SignedDistance + ?Sized>(
    ray: &Ray,
    sdf: &S,
    max_distance: f32,
) -> MarchResult {
    let mut point = ray.origin.vec();
    let mut distance = sdf.distance(point);
    let inside = distance < 0.0;
    let mut step_scale = if inside { -1.0 } else { 1.0 };

    let miss = |point, distance: f32| MarchResult {
        hit: false,
        point,
        normal: Vec3::ZERO,
        inside: distance < 0.0,
    };

    for _ in 0..MAX_STEPS {
        if !distance.is_finite() || distance.abs() > max_distance {
            return miss(point, distance);
        }
        if distance.abs() <= SURFACE_EPSILON {
            return MarchResult {
                hit: true,
                point,
                normal: marched_normal(point, sdf),
                inside,
            };
        }

        point += ray.direction * distance * step_scale;
        let next = sdf.distance(point);
        // Crossed the surface: go back with smaller steps
        if distance * next < -SURFACE_EPSILON * SURFACE_EPSILON {
            step_scale *= 0.5;
        }
        distance = next;
    }

    counter!("Sphere marching exhausted its steps");
    miss(point, distance)
}

/// A [`Shape`] whose surface is the zero set of a signed distance function.
///
/// Marching starts where the ray enters the function's bounds, not at the ray origin.
pub struct Marched<S: SignedDistance> {
    pub sdf: S,
    pub max_distance: f32,
}

/// Margin around the declared bounds, so hits right on their faces aren't clipped
const BOUNDS_PADDING: f32 = 1e-3;

impl<S: SignedDistance> Marched<S> {
    pub fn new(sdf: S) -> Self {
        let max_distance = sdf.bounds().extent().length().max(BOUNDS_PADDING);
        Self { sdf, max_distance }
    }
}

impl<S: SignedDistance> Shape for Marched<S> {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let (enter, exit) = self.bounds().entry(ray)?;
        let start = Ray {
            origin: ray.at(enter),
            ..*ray
        };

        let march = marched_trace(&start, &self.sdf, self.max_distance);
        if !march.hit {
            return None;
        }

        let t = enter + (march.point - start.origin.vec()).dot(ray.direction);
        if !ray.contains(t) || t > exit {
            return None;
        }

        Some(SurfaceHit {
            t,
            position: march.point.into(),
            normal: march.normal,
            uv: sphere_uv_from_direction(march.normal),
        })
    }

    fn bounds(&self) -> Bounds {
        self.sdf.bounds().padded(BOUNDS_PADDING)
    }
}
