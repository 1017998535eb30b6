use glam::{Vec2, Vec3, Vec3Swizzles};

use crate::math::bounds::Bounds;

use super::SignedDistance;

#[derive(Debug, Clone, Copy)]
pub struct SdfSphere {
    pub radius: f32,
}

impl SdfSphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl SignedDistance for SdfSphere {
    fn distance(&self, p: Vec3) -> f32 {
        p.length() - self.radius
    }

    fn bounds(&self) -> Bounds {
        Bounds::centered(Vec3::splat(self.radius))
    }
}

/// A torus lying in the local xz plane
#[derive(Debug, Clone, Copy)]
pub struct SdfTorus {
    pub major_radius: f32,
    pub minor_radius: f32,
}

impl SignedDistance for SdfTorus {
    fn distance(&self, p: Vec3) -> f32 {
        let q = Vec2::new(p.xz().length() - self.major_radius, p.y);
        q.length() - self.minor_radius
    }

    fn bounds(&self) -> Bounds {
        let r = self.major_radius + self.minor_radius;
        Bounds::centered(Vec3::new(r, self.minor_radius, r))
    }
}

/// A box of half size `half_size` whose edges are rounded by `radius`
#[derive(Debug, Clone, Copy)]
pub struct SdfRoundBox {
    pub half_size: Vec3,
    pub radius: f32,
}

impl SignedDistance for SdfRoundBox {
    fn distance(&self, p: Vec3) -> f32 {
        let q = p.abs() - self.half_size + Vec3::splat(self.radius);
        q.max(Vec3::ZERO).length() + q.max_element().min(0.0) - self.radius
    }

    fn bounds(&self) -> Bounds {
        Bounds::centered(self.half_size)
    }
}

/// A sphere with sinusoidal bumps.
///
/// The displacement makes this overestimate the true distance when
/// `amplitude * frequency` is large, which the marcher has to correct.
#[derive(Debug, Clone, Copy)]
pub struct DisplacedSphere {
    pub radius: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl SignedDistance for DisplacedSphere {
    fn distance(&self, p: Vec3) -> f32 {
        let f = self.frequency;
        let bumps = (f * p.x).sin() * (f * p.y).sin() * (f * p.z).sin();
        p.length() - self.radius + self.amplitude * bumps
    }

    fn bounds(&self) -> Bounds {
        Bounds::centered(Vec3::splat(self.radius + self.amplitude.abs()))
    }
}

/// The power-`power` Mandelbulb, scaled to fit in a ball of radius ~`scale`
#[derive(Debug, Clone, Copy)]
pub struct Mandelbulb {
    pub power: f32,
    pub iterations: u32,
    pub scale: f32,
}

impl Default for Mandelbulb {
    fn default() -> Self {
        Self {
            power: 8.0,
            iterations: 12,
            scale: 1.0,
        }
    }
}

impl Mandelbulb {
    const BAILOUT: f32 = 2.0;

    /// Distance estimator in the unit-scale frame
    fn estimate(&self, c: Vec3) -> f32 {
        let mut z = c;
        let mut dr = 1.0;
        let mut r = z.length();

        for _ in 0..self.iterations {
            if r > Self::BAILOUT || r < f32::EPSILON {
                break;
            }
            let theta = (z.z / r).clamp(-1.0, 1.0).acos() * self.power;
            let phi = z.y.atan2(z.x) * self.power;
            dr = r.powf(self.power - 1.0) * self.power * dr + 1.0;

            let zr = r.powf(self.power);
            let (st, ct) = theta.sin_cos();
            let (sp, cp) = phi.sin_cos();
            z = zr * Vec3::new(st * cp, sp * st, ct) + c;
            r = z.length();
        }

        if r < f32::EPSILON {
            // Deep inside: the estimator degenerates at the fixed point
            return -f32::EPSILON;
        }
        0.5 * r.ln() * r / dr
    }
}

impl SignedDistance for Mandelbulb {
    fn distance(&self, p: Vec3) -> f32 {
        self.scale * self.estimate(p / self.scale)
    }

    fn bounds(&self) -> Bounds {
        Bounds::centered(Vec3::splat(1.2 * self.scale))
    }
}

/// A surface given by any closure, together with its bounds
pub struct Anonymous<F: Fn(Vec3) -> f32 + Send + Sync> {
    pub f: F,
    pub bounds: Bounds,
}

impl<F: Fn(Vec3) -> f32 + Send + Sync> Anonymous<F> {
    pub fn new(f: F, bounds: Bounds) -> Self {
        Self { f, bounds }
    }
}

impl<F: Fn(Vec3) -> f32 + Send + Sync> SignedDistance for Anonymous<F> {
    fn distance(&self, p: Vec3) -> f32 {
        (self.f)(p)
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}
