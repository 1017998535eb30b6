//! Cameras and the viewports turning pixel coordinates into primary rays.

use glam::Vec3;
use rand::{distributions::Uniform, prelude::Distribution};

use crate::{
    math::{axis::Axis, distributions::UniformUnitBall2, point::Point},
    ray::Ray,
    Rng,
};

/// A thin lens camera. It looks down its local -z axis, with +y up.
pub trait Camera: Send + Sync {
    fn origin(&self) -> Point {
        self.axis().origin
    }
    fn axis(&self) -> &Axis;
    /// Vertical field of view, in degrees
    fn fov(&self) -> f32;
    /// Distance from the lens to the plane in perfect focus
    fn focus_distance(&self) -> f32;
    /// Diameter of the lens. 0 gives a pinhole camera, everything in focus.
    fn aperture(&self) -> f32;
}

#[derive(Debug, Clone, Copy)]
pub struct SimpleCamera {
    axis: Axis,
    fov: f32,
    aperture: f32,
    focus_distance: f32,
}

impl SimpleCamera {
    pub fn new(
        origin: Point,
        up: Vec3,
        look_at: Point,
        fov: f32,
        aperture: f32,
        focus_distance: f32,
    ) -> Self {
        Self {
            axis: Axis::look_at(origin, look_at, up),
            fov,
            aperture,
            focus_distance,
        }
    }
}

impl Camera for SimpleCamera {
    fn axis(&self) -> &Axis {
        &self.axis
    }
    fn fov(&self) -> f32 {
        self.fov
    }
    fn focus_distance(&self) -> f32 {
        self.focus_distance
    }
    fn aperture(&self) -> f32 {
        self.aperture
    }
}

/// Generates world space primary rays for pixels of a `width` x `height` image.
///
/// Pixel `(0, 0)` is the top left corner.
pub trait RayGenerator: Send + Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn get_ray(&self, x: u32, y: u32, rng: &mut Rng) -> Ray;
}

/// A camera looking at an image plane.
///
/// Each ray goes through a random point of its pixel (antialiasing) and leaves from a random
/// point of the lens (depth of field).
pub struct Viewport<C: Camera> {
    camera: C,
    width: u32,
    height: u32,
    half_width: f32,
    half_height: f32,
}

impl<C: Camera> Viewport<C> {
    pub fn new(camera: C, width: u32, height: u32) -> Self {
        let half_height = (camera.fov().to_radians() / 2.0).tan();
        let aspect_ratio = width as f32 / height.max(1) as f32;
        Self {
            camera,
            width,
            height,
            half_width: half_height * aspect_ratio,
            half_height,
        }
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }
}

impl<C: Camera> RayGenerator for Viewport<C> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_ray(&self, x: u32, y: u32, rng: &mut Rng) -> Ray {
        let uniform = Uniform::new(0.0f32, 1.0);
        let px = (x as f32 + uniform.sample(rng)) / self.width as f32;
        let py = (y as f32 + uniform.sample(rng)) / self.height as f32;

        let on_image_plane = Vec3::new(
            (2.0 * px - 1.0) * self.half_width,
            (1.0 - 2.0 * py) * self.half_height,
            -1.0,
        );
        let focus = on_image_plane * self.camera.focus_distance();
        let lens = self.camera.aperture() / 2.0 * UniformUnitBall2.sample(rng);
        let lens = Vec3::new(lens.x, lens.y, 0.0);

        let axis = self.camera.axis();
        Ray::new(
            axis.transform_from(Point(lens)),
            axis.rotate_from(focus - lens),
        )
    }
}
