use log::trace;

use crate::{counter, error_once, ray::Ray, Ctx};

use super::{Integrator, RayResult};

/// Attenuations with every channel under this are treated as black
pub const ATTENUATION_EPSILON: f32 = 1e-6;

/// Recursive path tracer: `emitted + attenuation * (light coming along the scattered ray)`.
///
/// The recursion stops when the depth budget is spent or when the material absorbed
/// everything, as nothing coming back could then contribute.
#[derive(Debug, Clone, Copy)]
pub struct PathTracer {
    /// How far scattered rays are pushed off the surface they leave
    pub epsilon: f32,
}

impl Default for PathTracer {
    fn default() -> Self {
        Self { epsilon: 1e-4 }
    }
}

impl Integrator for PathTracer {
    fn ray_cast(&self, ctx: &mut Ctx, ray: Ray, depth: u32) -> RayResult {
        let scene = ctx.scene;
        let Some(hit) = scene.hit(&ray) else {
            return RayResult {
                color: scene.miss_color(&ray),
                depth: 0,
                rays: 1,
            };
        };

        let material = scene.material(hit.instance.material);
        let scattered = material.scatter(&hit, &mut ctx.rng);
        let ray_out = hit.axis().ray_from(&scattered.ray.offset(self.epsilon));

        let mut bounce = depth > 0 && !scattered.attenuation.is_black(ATTENUATION_EPSILON);
        if bounce && !ray_out.direction.is_finite() {
            counter!("Non finite scattered rays");
            error_once!(
                "Material {:?} scattered a non finite direction {:?}, ending the path",
                hit.instance.material,
                scattered.ray.direction
            );
            bounce = false;
        }

        if bounce {
            trace!("depth {depth}, bounce at t = {}", hit.t);
            let next = self.ray_cast(ctx, ray_out, depth - 1);
            RayResult {
                color: scattered.emitted + scattered.attenuation * next.color,
                depth: next.depth + 1,
                rays: next.rays + 1,
            }
        } else {
            RayResult {
                color: scattered.emitted,
                depth: 1,
                rays: 1,
            }
        }
    }
}
