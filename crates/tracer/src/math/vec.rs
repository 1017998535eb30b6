pub use glam::Vec3;

use crate::color::Rgb;

pub trait Vec3AsRgbExt {
    fn rgb(&self) -> Rgb;
}

impl Vec3AsRgbExt for Vec3 {
    fn rgb(&self) -> Rgb {
        Rgb::from_array(self.to_array())
    }
}

/// Named apart from glam's own `reflect`/`refract`, which report total internal reflection as
/// a zero vector.
pub trait RefrReflVecExt {
    /// Bend `self` through a surface whose `normal` faces against `self`.
    ///
    /// `eta` is the ratio of the indices of refraction (incoming over outgoing).
    /// Returns None on total internal reflection.
    fn try_refract(self, normal: Vec3, eta: f32) -> Option<Vec3>;
    fn mirror(self, normal: Vec3) -> Vec3;
}

impl RefrReflVecExt for Vec3 {
    fn mirror(self, normal: Vec3) -> Vec3 {
        self - (2.0 * self.dot(normal) * normal)
    }

    fn try_refract(self, normal: Vec3, eta: f32) -> Option<Vec3> {
        let cosi = -self.dot(normal);
        let k = 1.0 - eta * eta * (1.0 - cosi * cosi);

        if k < 0.0 {
            None
        } else {
            Some(eta * self + (eta * cosi - k.sqrt()) * normal)
        }
    }
}

pub trait Vec3AsNonZero: Sized {
    /// Returns `Some(self)` if `self` is longer than `eps`
    ///
    /// Returns None if any component is NaN
    fn into_non_zero(self, eps: f32) -> Option<Self>;
}

impl Vec3AsNonZero for Vec3 {
    fn into_non_zero(self, eps: f32) -> Option<Self> {
        (self.length_squared() > eps * eps).then_some(self)
    }
}
