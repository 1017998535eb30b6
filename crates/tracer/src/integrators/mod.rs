use crate::{color::Rgb, ray::Ray, Ctx};

mod pathtracing;

pub use pathtracing::PathTracer;

/// What one camera ray brought back
#[derive(Debug, Default, Clone, Copy)]
pub struct RayResult {
    pub color: Rgb,
    /// Number of surfaces the path bounced on
    pub depth: u32,
    /// Number of rays cast against the scene, the camera ray included
    pub rays: u64,
}

pub trait Integrator: Send + Sync {
    /// Radiance coming back along `ray` (in world space), following at most `depth` bounces
    /// after the first hit
    fn ray_cast(&self, ctx: &mut Ctx, ray: Ray, depth: u32) -> RayResult;
}
