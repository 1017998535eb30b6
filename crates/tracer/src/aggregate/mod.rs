//! Closest-hit queries over every instance of a scene.
//!
//! Both aggregates must report exactly the same hit for the same ray; the [`bvh::Bvh`] only
//! gets there faster.

pub mod bvh;
pub mod linear;

use crate::{
    error::ConfigError,
    ray::Ray,
    scene::{Geometry, Intersect},
};

pub use bvh::Bvh;
pub use linear::LinearScan;

pub trait Aggregate: Send + Sync {
    /// Closest hit of `ray` against the instances of `geometry`, within the ray's bounds
    fn hit<'a>(&self, geometry: &'a Geometry, ray: &Ray) -> Option<Intersect<'a>>;
}

/// How a scene finds its closest hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Accelerator {
    /// Test every instance
    #[display("linear scan")]
    Linear,
    /// Bounding volume hierarchy, with leaves of at most `leaf_threshold` instances
    #[display("bvh (leaf threshold: {leaf_threshold})")]
    Bvh { leaf_threshold: usize },
}

impl Default for Accelerator {
    fn default() -> Self {
        Accelerator::Bvh { leaf_threshold: 16 }
    }
}

impl Accelerator {
    pub fn build(self, geometry: &Geometry) -> Result<Box<dyn Aggregate>, ConfigError> {
        match self {
            Accelerator::Linear => Ok(Box::new(LinearScan)),
            Accelerator::Bvh { leaf_threshold: 0 } => Err(ConfigError::ZeroLeafThreshold),
            Accelerator::Bvh { leaf_threshold } => {
                Ok(Box::new(Bvh::build(geometry, leaf_threshold)))
            }
        }
    }
}
