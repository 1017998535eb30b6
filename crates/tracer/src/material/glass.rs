use rand::prelude::Distribution;

use crate::{
    color::Rgb,
    math::{
        distributions::UniformUnitBall3,
        vec::{RefrReflVecExt, Vec3AsNonZero},
    },
    ray::Ray,
    scene::Intersect,
    Rng,
};

use super::{Material, Scattered};

/// A dielectric of index `ior`, surrounded by vacuum.
///
/// Rays always refract unless refraction is impossible, in which case they are reflected.
#[derive(Debug, Clone, Copy)]
pub struct Glass {
    pub color: Rgb,
    pub fuzz: f32,
    pub ior: f32,
}

impl Material for Glass {
    fn scatter(&self, hit: &Intersect, rng: &mut Rng) -> Scattered {
        let fuzz = self.fuzz * UniformUnitBall3.sample(rng);
        let normal = (hit.normal + fuzz)
            .into_non_zero(1e-3)
            .unwrap_or(hit.normal)
            .normalize();
        let eta = if hit.inside { self.ior } else { 1.0 / self.ior };

        let direction = hit
            .ray
            .direction
            .try_refract(normal, eta)
            .unwrap_or_else(|| hit.ray.direction.mirror(normal));

        Scattered {
            ray: Ray::new(hit.position, direction),
            attenuation: self.color,
            emitted: Rgb::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::SeedableRng;

    use super::Glass;
    use crate::{
        color::linear,
        material::{test_utils, Material},
        Rng,
    };

    fn glass() -> Glass {
        Glass {
            color: linear::WHITE,
            fuzz: 0.0,
            ior: 1.5,
        }
    }

    #[test]
    fn entering_bends_towards_the_normal() {
        let instance = test_utils::instance();
        let hit = test_utils::hit_from(&instance, Vec3::new(-1.0, 1.0, 0.0));
        let s = glass().scatter(&hit, &mut Rng::seed_from_u64(0));
        // goes through the surface
        assert!(s.ray.direction.y < 0.0);
        let sin_in = hit.ray.direction.x;
        let sin_out = s.ray.direction.x;
        assert!((sin_in - 1.5 * sin_out).abs() < 1e-4);
    }

    #[test]
    fn grazing_exit_is_reflected() {
        let instance = test_utils::instance();
        // from inside, 80 degrees off the normal: beyond the critical angle
        let from = Vec3::new(-(80f32.to_radians().tan()), -1.0, 0.0);
        let hit = test_utils::hit_from(&instance, from);
        assert!(hit.inside);
        let s = glass().scatter(&hit, &mut Rng::seed_from_u64(0));
        assert!(s.ray.direction.is_finite());
        assert!((s.ray.direction.length() - 1.0).abs() < 1e-5);
        // stays inside, i.e. below the surface, mirrored about the normal
        assert!(s.ray.direction.y < 0.0);
        assert!(s.ray.direction.x > 0.0);
        let expected = Vec3::new(hit.ray.direction.x, -hit.ray.direction.y, 0.0);
        assert!(s.ray.direction.distance(expected) < 1e-5);
    }
}
