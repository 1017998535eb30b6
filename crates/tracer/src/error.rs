//! Errors reported by the engine.
//!
//! Everything that can go wrong is detected while setting a render up: once a frame has
//! started, tracing has no failure path. The only runtime error is the frame losing its
//! workers before every tile came back.

use thiserror::Error;

use crate::{material::MaterialId, shape::ShapeId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("max samples per pixel must be at least 1")]
    ZeroSamples,
    #[error("tile size must be at least 1")]
    ZeroTileSize,
    #[error("output image must not be empty, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f32),
    #[error("bvh leaf threshold must be at least 1")]
    ZeroLeafThreshold,
    #[error("unknown material {0:?}")]
    UnknownMaterial(MaterialId),
    #[error("unknown shape {0:?}")]
    UnknownShape(ShapeId),
    #[error("can't build the worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("workers disconnected before the frame completed ({received}/{expected} tiles received)")]
    Disconnected { received: usize, expected: usize },
}
