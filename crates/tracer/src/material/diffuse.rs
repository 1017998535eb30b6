use rand::prelude::Distribution;

use crate::{
    color::Rgb,
    math::{distributions::UniformUnitBall3, vec::Vec3AsNonZero},
    ray::Ray,
    scene::Intersect,
    Rng,
};

use super::{
    texture::{Checker, Texture, Uniform},
    Material, Scattered,
};

/// Lambertian-like bounce around the normal
pub struct Diffuse {
    pub texture: Box<dyn Texture>,
}

impl Diffuse {
    pub fn new(color: Rgb) -> Self {
        Self {
            texture: Box::new(Uniform(color)),
        }
    }

    pub fn checkered(a: Rgb, b: Rgb, scale: f32) -> Self {
        Self {
            texture: Box::new(Checker { a, b, scale }),
        }
    }
}

impl Material for Diffuse {
    fn scatter(&self, hit: &Intersect, rng: &mut Rng) -> Scattered {
        let bounce_noise = UniformUnitBall3.sample(rng);
        let direction = (hit.normal + bounce_noise)
            .into_non_zero(1e-3)
            .unwrap_or(hit.normal);

        Scattered {
            ray: Ray::new(hit.position, direction),
            attenuation: self.texture.color(hit.uv, hit.position),
            emitted: Rgb::default(),
        }
    }
}
