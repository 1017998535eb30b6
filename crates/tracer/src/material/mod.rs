//! Materials: how a surface turns an incoming ray into an outgoing one.
//!
//! Every material works in the local frame of the hit primitive: the [`Intersect`] it receives
//! holds the local ray, position and normal, and the [`Scattered`] ray it returns is expressed
//! in that same frame. The tracer takes care of moving it back to world space.

mod diffuse;
mod glass;
mod light;
mod metal;
mod normal;
pub mod texture;

pub use diffuse::Diffuse;
pub use glass::Glass;
pub use light::Light;
pub use metal::Metal;
pub use normal::SurfaceNormal;

use crate::{color::Rgb, ray::Ray, scene::Intersect, Rng};

pub trait Material: Sync + Send {
    /// Never fails: every hit produces an outgoing ray, possibly with a black attenuation
    /// when the path should stop there.
    fn scatter(&self, hit: &Intersect, rng: &mut Rng) -> Scattered;
}

/// The outcome of a scattering event
#[derive(Debug, Clone, Copy)]
pub struct Scattered {
    /// Outgoing ray, in the hit's local frame
    pub ray: Ray,
    /// Multiplies whatever light comes back along `ray`
    pub attenuation: Rgb,
    /// Added whatever comes back along `ray`
    pub emitted: Rgb,
}

pub struct MaterialDescriptor {
    pub label: Option<String>,
    pub material: Box<dyn Material>,
}

impl std::fmt::Debug for MaterialDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialDescriptor")
            .field("label", &self.label)
            .field("material", &"<material>")
            .finish()
    }
}

/// Handle to a material owned by the scene, shared by any number of instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);
