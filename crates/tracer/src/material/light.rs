use crate::{color::Rgb, scene::Intersect, Rng};

use super::{Material, Scattered};

/// Emits `color`, brightest when seen head on, and absorbs everything else
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub color: Rgb,
}

impl Material for Light {
    fn scatter(&self, hit: &Intersect, _rng: &mut Rng) -> Scattered {
        let intensity = hit.normal.dot(hit.ray.direction).abs();
        Scattered {
            ray: hit.ray,
            attenuation: Rgb::default(),
            emitted: intensity * self.color,
        }
    }
}
