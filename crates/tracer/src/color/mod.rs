use std::ops::{Add, AddAssign, Div, Mul};

use bytemuck::{Pod, Zeroable};

/// Linear RGB radiance. Components are not bounded: lights go well above 1.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self(arr)
    }

    pub const fn splat(v: f32) -> Self {
        Self([v, v, v])
    }

    pub const fn to_array(self) -> [f32; 3] {
        self.0
    }

    pub fn is_black(self, eps: f32) -> bool {
        self.0.iter().all(|c| c.abs() <= eps)
    }

    pub fn is_finite(self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    pub fn clamp(self, min: f32, max: f32) -> Self {
        Self(self.0.map(|c| c.clamp(min, max)))
    }

    /// Clamp to [0; 1] then quantize to 8 bits, rounding to nearest
    pub fn to_byte_array(self) -> [u8; 3] {
        self.clamp(0.0, 1.0).0.map(|c| (c * 255. + 0.5) as u8)
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(val: [f32; 3]) -> Self {
        Rgb::from_array(val)
    }
}

impl Add for Rgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl AddAssign for Rgb {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Component-wise product, i.e. filtering by an attenuation
impl Mul for Rgb {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self([
            self.0[0] * rhs.0[0],
            self.0[1] * rhs.0[1],
            self.0[2] * rhs.0[2],
        ])
    }
}

impl Mul<Rgb> for f32 {
    type Output = Rgb;

    fn mul(self, rhs: Rgb) -> Self::Output {
        Rgb(rhs.0.map(|c| self * c))
    }
}

impl Div<f32> for Rgb {
    type Output = Rgb;

    fn div(self, rhs: f32) -> Self::Output {
        Rgb(self.0.map(|c| c / rhs))
    }
}

pub mod linear {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::from_array([1.0, 1.0, 1.0]);
    pub const BLACK: Rgb = Rgb::from_array([0.0, 0.0, 0.0]);
    pub const GREY: Rgb = Rgb::from_array([0.2, 0.2, 0.2]);
    pub const RED: Rgb = Rgb::from_array([1.0, 0.0, 0.0]);
    pub const GREEN: Rgb = Rgb::from_array([0.0, 1.0, 0.0]);
    pub const BLUE: Rgb = Rgb::from_array([0.0, 0.0, 1.0]);
}
