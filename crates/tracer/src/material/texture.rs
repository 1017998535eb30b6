use crate::{color::Rgb, math::point::Point, shape::Uv};

/// A color that may vary over a surface
pub trait Texture: Send + Sync {
    fn color(&self, uv: Uv, position: Point) -> Rgb;
}

#[derive(Debug, Clone, Copy)]
pub struct Uniform(pub Rgb);

impl Texture for Uniform {
    fn color(&self, _uv: Uv, _position: Point) -> Rgb {
        self.0
    }
}

/// Alternates `a` and `b` on a grid of `scale` x `scale` cells per uv unit
#[derive(Debug, Clone, Copy)]
pub struct Checker {
    pub a: Rgb,
    pub b: Rgb,
    pub scale: f32,
}

impl Texture for Checker {
    fn color(&self, uv: Uv, _position: Point) -> Rgb {
        let cell = (uv * self.scale).floor();
        if (cell.x + cell.y).rem_euclid(2.0) < 0.5 {
            self.b
        } else {
            self.a
        }
    }
}

/// Escape-time colouring of the Mandelbrot set, with uv in [0;1]² spanning the whole set
#[derive(Debug, Clone, Copy)]
pub struct Mandelbrot {
    pub base: Rgb,
    pub max_iterations: u32,
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self {
            base: Rgb::from_array([0.4, 0.2, 0.1]),
            max_iterations: 64,
        }
    }
}

impl Mandelbrot {
    /// Fraction of `max_iterations` reached before escaping, 1 inside the set
    pub fn escape(&self, uv: Uv) -> f32 {
        let (cr, ci) = (3.0 * uv.x - 2.0, 3.0 * uv.y - 1.5);
        let (mut zr, mut zi) = (0.0f32, 0.0f32);
        for i in 0..self.max_iterations {
            if zr * zr + zi * zi > 4.0 {
                return i as f32 / self.max_iterations as f32;
            }
            (zr, zi) = (zr * zr - zi * zi + cr, 2.0 * zr * zi + ci);
        }
        1.0
    }
}

impl Texture for Mandelbrot {
    fn color(&self, uv: Uv, _position: Point) -> Rgb {
        (0.1 + 0.9 * self.escape(uv)) * self.base
    }
}
