use glam::Vec3;
use rand::prelude::Distribution;

use crate::{
    color::linear,
    math::{
        distributions::UniformUnitBall3,
        vec::{Vec3AsNonZero, Vec3AsRgbExt},
    },
    ray::Ray,
    scene::Intersect,
    Rng,
};

use super::{Material, Scattered};

/// Debug material showing the normal as a color.
///
/// Only the side selected by `inside` is shaded; hits on the other side go straight through,
/// which makes it possible to look at the inner faces of closed shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceNormal {
    pub inside: bool,
}

impl Material for SurfaceNormal {
    fn scatter(&self, hit: &Intersect, rng: &mut Rng) -> Scattered {
        if hit.inside == self.inside {
            let direction = (hit.normal + UniformUnitBall3.sample(rng))
                .into_non_zero(1e-3)
                .unwrap_or(hit.normal);
            Scattered {
                ray: Ray::new(hit.position, direction),
                attenuation: linear::BLACK,
                emitted: ((hit.normal + Vec3::ONE) / 2.0).rgb(),
            }
        } else {
            Scattered {
                ray: Ray::new(hit.position, hit.ray.direction),
                attenuation: linear::WHITE,
                emitted: linear::BLACK,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::SeedableRng;

    use super::SurfaceNormal;
    use crate::{
        color::Rgb,
        material::{test_utils, Material},
        Rng,
    };

    #[test]
    fn matching_side_shows_normal() {
        let instance = test_utils::instance();
        let hit = test_utils::hit_from(&instance, Vec3::Y);
        let s = SurfaceNormal { inside: false }.scatter(&hit, &mut Rng::seed_from_u64(0));
        assert_eq!(s.emitted, Rgb::from_array([0.5, 1.0, 0.5]));
        assert!(s.attenuation.is_black(0.0));
    }

    #[test]
    fn other_side_passes_through() {
        let instance = test_utils::instance();
        let hit = test_utils::hit_from(&instance, Vec3::NEG_Y);
        let s = SurfaceNormal { inside: false }.scatter(&hit, &mut Rng::seed_from_u64(0));
        assert_eq!(s.attenuation, Rgb::splat(1.0));
        assert!(s.emitted.is_black(0.0));
        assert_eq!(s.ray.direction, hit.ray.direction);
    }
}
