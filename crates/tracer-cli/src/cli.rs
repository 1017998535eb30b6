use core::fmt::Display;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracer::{aggregate::Accelerator, frame::FrameBuilder, sampler::Sampling};

#[derive(Parser, Debug)]
#[command(about = "Render a demo scene with a stochastic path tracer")]
pub struct Args {
    #[arg(short, long, default_value = "800x600")]
    /// Image dimension in format `width`x`height`
    pub dimensions: Dimensions,

    #[arg(long = "spp", default_value_t = 64)]
    /// Maximum number of samples per pixel
    pub max_spp: u32,

    #[arg(long = "min-spp", default_value_t = 5)]
    /// Samples every pixel gets before adaptive sampling may stop
    pub min_spp: u32,

    #[arg(long, default_value_t = 16)]
    /// Bounces followed after the first hit
    pub max_depth: u32,

    #[arg(long, default_value_t = 0.002)]
    /// Stop sampling a pixel once the standard error of its mean is under this value
    pub tolerance: f32,

    #[arg(long)]
    /// Give every pixel `--spp` samples, ignoring `--tolerance`
    pub fixed_sampling: bool,

    #[arg(short, long)]
    /// Number of workers, defaults to twice the number of cores
    pub workers: Option<usize>,

    #[arg(long, default_value_t = 32)]
    pub tile_size: u32,

    #[arg(long, default_value_t)]
    /// Seed to use for all the random stuff.
    /// Given a seed, the rendering is deterministic (the output only depends on x, y, sample and seed).
    pub seed: u64,

    #[arg(long, value_enum, default_value_t)]
    /// Scene selector
    pub scene: AvailableScene,

    #[arg(long, value_enum, default_value_t)]
    pub accelerator: AvailableAccelerator,

    #[arg(long, default_value_t = 16)]
    /// Maximum number of instances in a bvh leaf
    pub leaf_threshold: usize,

    #[arg(short, long, default_value = "output.jpg")]
    /// Where to write the image. The format is guessed from the extension.
    pub output: PathBuf,

    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    /// JPEG quality
    pub quality: u8,

    #[arg(long, default_value_t = 500)]
    /// How often the progress line is printed
    pub report_interval_ms: u64,
}

impl Args {
    pub fn sampling(&self) -> Sampling {
        if self.fixed_sampling {
            Sampling::Fixed
        } else {
            Sampling::Adaptive {
                tolerance: self.tolerance,
            }
        }
    }

    pub fn accelerator(&self) -> Accelerator {
        match self.accelerator {
            AvailableAccelerator::Linear => Accelerator::Linear,
            AvailableAccelerator::Bvh => Accelerator::Bvh {
                leaf_threshold: self.leaf_threshold,
            },
        }
    }

    pub fn frame_builder(&self) -> FrameBuilder {
        let builder = FrameBuilder::new()
            .max_samples(self.max_spp)
            .min_samples(self.min_spp)
            .max_depth(self.max_depth)
            .sampling(self.sampling())
            .tile_size(self.tile_size)
            .seed(self.seed);
        match self.workers {
            Some(workers) => builder.workers(workers),
            None => builder,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableScene {
    /// 200 spheres on a wavy ring under a light
    #[default]
    Ring,
    /// Sphere marched shapes on a checkered floor
    Marched,
    /// A few shapes colored by their normals
    Normals,
}

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableAccelerator {
    Linear,
    #[default]
    Bvh,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::str::FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((a, b)) = s.split_once('x') else {
            return Err(anyhow::anyhow!("Incorrect format, expected `width`x`height`"));
        };
        let width: u32 = a.trim().parse()?;
        let height: u32 = b.trim().parse()?;

        Ok(Dimensions { width, height })
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}x{}", self.width, self.height))
    }
}
