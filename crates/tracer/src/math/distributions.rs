use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use rand::{distributions::Uniform, prelude::Distribution, Rng};

/// Uniform point inside the unit ball, by rejection from the enclosing cube
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformUnitBall3;

impl Distribution<Vec3> for UniformUnitBall3 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let uniform = Uniform::new_inclusive(-1.0f32, 1.0);
        loop {
            let p = Vec3::new(
                uniform.sample(rng),
                uniform.sample(rng),
                uniform.sample(rng),
            );
            if p.length_squared() <= 1.0 {
                return p;
            }
        }
    }
}

/// Uniform point inside the unit disc
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformUnitBall2;

impl Distribution<Vec2> for UniformUnitBall2 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let uniform = Uniform::new(0.0f32, 1.0);
        let phi = TAU * uniform.sample(rng);
        let r = uniform.sample(rng).sqrt();
        let (s, c) = f32::sin_cos(phi);
        Vec2::new(r * c, r * s)
    }
}

/// Equirectangular mapping of a unit direction, with +y as the pole
pub fn sphere_uv_from_direction(direction: Vec3) -> Vec2 {
    let h = direction.y.clamp(-1.0, 1.0);
    let u = 0.5 + f32::atan2(direction.x, direction.z) / TAU;
    let v = f32::acos(h) / PI;

    Vec2::new(u, v)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::{prelude::Distribution, SeedableRng};

    use super::{sphere_uv_from_direction, UniformUnitBall2, UniformUnitBall3};
    use crate::Rng;

    #[test]
    fn ball_samples_stay_inside() {
        let mut rng = Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(UniformUnitBall3.sample(&mut rng).length() <= 1.0);
            assert!(UniformUnitBall2.sample(&mut rng).length() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn poles_map_to_v_extremes() {
        assert!(sphere_uv_from_direction(Vec3::Y).y.abs() < 1e-6);
        assert!((sphere_uv_from_direction(Vec3::NEG_Y).y - 1.0).abs() < 1e-6);
        let equator = sphere_uv_from_direction(Vec3::Z);
        assert!((equator.x - 0.5).abs() < 1e-6);
        assert!((equator.y - 0.5).abs() < 1e-6);
    }
}
