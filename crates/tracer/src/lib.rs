pub mod aggregate;
pub mod camera;
pub mod color;
pub mod error;
pub mod frame;
pub mod integrators;
pub mod material;
pub mod math;
pub mod output;
pub mod ray;
pub mod sampler;
pub mod scene;
pub mod shape;
pub mod tile;
pub mod utils;

pub use rand_xoshiro::Xoshiro256StarStar as Rng;

pub struct Ctx<'a> {
    pub rng: Rng,
    pub scene: &'a scene::Scene,
}

/// Everything a sample's randomness depends on.
///
/// Given a seed, the rendering is deterministic: the output only depends on x, y, sample and seed,
/// not on which worker happened to pick the tile.
#[derive(Debug, Copy, Clone, Hash)]
#[repr(C)]
pub struct Seed {
    pub seed: u64,
    pub x: u32,
    pub y: u32,
    pub sample_idx: u32,
}

impl Seed {
    pub fn into_rng(self) -> Rng {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        std::hash::Hash::hash(&self, &mut hasher);
        <Rng as rand::SeedableRng>::seed_from_u64(std::hash::Hasher::finish(&hasher))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::Seed;

    #[test]
    fn seed_is_reproducible() {
        let seed = Seed {
            seed: 7,
            x: 3,
            y: 4,
            sample_idx: 2,
        };
        let a: [f32; 4] = seed.into_rng().gen();
        let b: [f32; 4] = seed.into_rng().gen();
        assert_eq!(a, b);

        let other: [f32; 4] = Seed {
            sample_idx: 3,
            ..seed
        }
        .into_rng()
        .gen();
        assert_ne!(a, other);
    }
}
