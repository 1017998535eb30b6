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

/// Mirror reflection about a normal perturbed by up to `fuzz`
#[derive(Debug, Clone, Copy)]
pub struct Metal {
    pub color: Rgb,
    pub fuzz: f32,
}

impl Material for Metal {
    fn scatter(&self, hit: &Intersect, rng: &mut Rng) -> Scattered {
        let fuzz = self.fuzz * UniformUnitBall3.sample(rng);
        let normal = (hit.normal + fuzz)
            .into_non_zero(1e-3)
            .unwrap_or(hit.normal)
            .normalize();

        Scattered {
            ray: Ray::new(hit.position, hit.ray.direction.mirror(normal)),
            attenuation: self.color,
            emitted: Rgb::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::SeedableRng;

    use super::Metal;
    use crate::{
        color::Rgb,
        material::{test_utils, Material},
        Rng,
    };

    #[test]
    fn polished_metal_is_a_mirror() {
        let metal = Metal {
            color: Rgb::splat(0.9),
            fuzz: 0.0,
        };
        let instance = test_utils::instance();
        let hit = test_utils::hit_from(&instance, Vec3::new(-1.0, 1.0, 0.0));
        let s = metal.scatter(&hit, &mut Rng::seed_from_u64(0));
        assert!(s.ray.direction.distance(Vec3::new(1.0, 1.0, 0.0).normalize()) < 1e-5);
        assert_eq!(s.attenuation, Rgb::splat(0.9));
    }

    #[test]
    fn fuzz_spreads_reflections() {
        let metal = Metal {
            color: Rgb::splat(0.9),
            fuzz: 0.3,
        };
        let instance = test_utils::instance();
        let hit = test_utils::hit_from(&instance, Vec3::Y);
        let mut rng = Rng::seed_from_u64(3);
        let directions: Vec<_> = (0..10)
            .map(|_| metal.scatter(&hit, &mut rng).ray.direction)
            .collect();
        assert!(directions.iter().any(|d| d.distance(Vec3::Y) > 1e-3));
        assert!(directions.iter().all(|d| d.y > 0.0));
    }
}
