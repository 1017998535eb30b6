//! Per-pixel sampling: how many camera rays a pixel gets and how they are averaged.

use crate::{
    camera::RayGenerator,
    color::{linear, Rgb},
    counter,
    error::ConfigError,
    integrators::Integrator,
    math::stat::RgbSeries,
    scene::Scene,
    warn_once, Ctx, Seed,
};

/// When to stop sampling a pixel before reaching `max_samples`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    /// Stop once the standard error of the pixel's mean falls under `tolerance`
    Adaptive { tolerance: f32 },
    /// Always take `max_samples`
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPolicy {
    /// Samples taken before adaptive sampling may stop, capped by `max_samples`
    pub min_samples: u32,
    pub max_samples: u32,
    /// Bounces followed after the first hit
    pub max_depth: u32,
    pub sampling: Sampling,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            min_samples: 5,
            max_samples: 64,
            max_depth: 16,
            sampling: Sampling::Adaptive { tolerance: 0.002 },
        }
    }
}

impl SamplingPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if let Sampling::Adaptive { tolerance } = self.sampling {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
        }
        Ok(())
    }

    /// Samples every pixel gets, whatever its statistics
    pub fn sample_floor(&self) -> u32 {
        match self.sampling {
            Sampling::Adaptive { .. } => self.min_samples.min(self.max_samples),
            Sampling::Fixed => self.max_samples,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PixelResult {
    /// Mean of the samples, not clamped
    pub color: Rgb,
    pub samples: u32,
    /// Deepest path among the samples
    pub depth: u32,
    pub rays: u64,
}

/// Render a pixel: trace camera rays until the policy says the mean is good enough.
///
/// Sample `k` of pixel `(x, y)` always uses the same random sequence for a given `seed`, so
/// the result doesn't depend on which thread renders the pixel.
pub fn render_pixel(
    scene: &Scene,
    viewport: &dyn RayGenerator,
    integrator: &dyn Integrator,
    policy: &SamplingPolicy,
    seed: u64,
    (x, y): (u32, u32),
) -> PixelResult {
    let mut series = RgbSeries::new();
    let mut result = PixelResult::default();

    for sample_idx in 0..policy.max_samples {
        let mut ctx = Ctx {
            rng: Seed {
                seed,
                x,
                y,
                sample_idx,
            }
            .into_rng(),
            scene,
        };
        let ray = viewport.get_ray(x, y, &mut ctx.rng);
        let ray_result = integrator.ray_cast(&mut ctx, ray, policy.max_depth);

        result.samples += 1;
        result.rays += ray_result.rays;
        result.depth = result.depth.max(ray_result.depth);

        if ray_result.color.is_finite() {
            series.add_sample(ray_result.color);
        } else {
            counter!("Non finite samples");
            warn_once!(
                "Dropping a non finite sample at pixel ({x}, {y}): {:?}",
                ray_result.color
            );
        }

        if let Sampling::Adaptive { tolerance } = policy.sampling {
            if result.samples >= policy.sample_floor()
                && result.samples >= result.depth
                && series.maturity() < tolerance
            {
                counter!("Adaptive sampling break");
                break;
            }
        }
    }

    result.color = if series.count() == 0 {
        linear::BLACK
    } else {
        series.mean()
    };
    result
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::{distributions::Uniform, prelude::Distribution};

    use super::{render_pixel, Sampling, SamplingPolicy};
    use crate::{
        aggregate::Accelerator,
        camera::RayGenerator,
        color::{linear, Rgb},
        error::ConfigError,
        integrators::PathTracer,
        material::Diffuse,
        math::{axis::Axis, point::Point},
        ray::Ray,
        scene::{Background, PrimitiveInstance, Scene, SceneBuilder},
        shape::Sphere,
        Rng,
    };

    /// Rays spread over the half space facing -z from the origin
    struct Spread;

    impl RayGenerator for Spread {
        fn width(&self) -> u32 {
            4
        }
        fn height(&self) -> u32 {
            4
        }
        fn get_ray(&self, x: u32, y: u32, rng: &mut Rng) -> Ray {
            let jitter = Uniform::new(-0.2f32, 0.2);
            let dx = (x as f32 - 1.5) * 0.3 + jitter.sample(rng);
            let dy = (y as f32 - 1.5) * 0.3 + jitter.sample(rng);
            Ray::new(Point::ORIGIN, Vec3::new(dx, dy, -1.0))
        }
    }

    fn diffuse_scene() -> Scene {
        let mut builder = SceneBuilder::new().with_background(Background::Gradient {
            horizon: linear::WHITE,
            zenith: Rgb::from_array([0.2, 0.4, 1.0]),
        });
        let material = builder.insert_material(None, Diffuse::new(Rgb::splat(0.7)));
        let sphere = builder.insert_shape(Sphere::new(1.0));
        builder
            .insert_instance(PrimitiveInstance::new(
                Axis::translation(Point::new(0.0, 0.0, -3.0)),
                sphere,
                material,
            ))
            .unwrap();
        builder.build(Accelerator::default()).unwrap()
    }

    #[test]
    fn sample_counts_stay_in_bounds() {
        let scene = diffuse_scene();
        for (min_samples, max_samples, tolerance) in
            [(5, 64, 0.01), (1, 3, 0.5), (8, 8, 0.0), (20, 10, 1.0)]
        {
            let policy = SamplingPolicy {
                min_samples,
                max_samples,
                max_depth: 4,
                sampling: Sampling::Adaptive { tolerance },
            };
            for x in 0..4 {
                for y in 0..4 {
                    let res = render_pixel(&scene, &Spread, &PathTracer::default(), &policy, 0, (x, y));
                    assert!(res.samples >= policy.sample_floor(), "{res:?}");
                    assert!(res.samples <= max_samples, "{res:?}");
                    assert!(res.rays >= res.samples as u64);
                }
            }
        }
    }

    #[test]
    fn flat_pixel_stops_at_the_floor() {
        let scene = SceneBuilder::new().build(Accelerator::Linear).unwrap();
        let policy = SamplingPolicy {
            sampling: Sampling::Adaptive { tolerance: 1e-3 },
            ..Default::default()
        };
        let res = render_pixel(&scene, &Spread, &PathTracer::default(), &policy, 0, (1, 1));
        assert_eq!(res.samples, 5);
        assert_eq!(res.color, linear::GREY);
        assert_eq!(res.depth, 0);
    }

    #[test]
    fn fixed_sampling_takes_every_sample() {
        let scene = diffuse_scene();
        let policy = SamplingPolicy {
            max_samples: 12,
            sampling: Sampling::Fixed,
            ..Default::default()
        };
        let res = render_pixel(&scene, &Spread, &PathTracer::default(), &policy, 0, (2, 2));
        assert_eq!(res.samples, 12);
    }

    #[test]
    fn pixels_are_reproducible() {
        let scene = diffuse_scene();
        let policy = SamplingPolicy::default();
        let a = render_pixel(&scene, &Spread, &PathTracer::default(), &policy, 9, (1, 2));
        let b = render_pixel(&scene, &Spread, &PathTracer::default(), &policy, 9, (1, 2));
        assert_eq!(a.color, b.color);
        assert_eq!(a.samples, b.samples);
    }

    #[test]
    fn validation() {
        let zero = SamplingPolicy {
            max_samples: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroSamples)));

        let nan = SamplingPolicy {
            sampling: Sampling::Adaptive { tolerance: f32::NAN },
            ..Default::default()
        };
        assert!(matches!(nan.validate(), Err(ConfigError::InvalidTolerance(_))));
        assert!(SamplingPolicy::default().validate().is_ok());
    }
}
