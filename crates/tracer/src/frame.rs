//! Rendering a whole image: tiles, workers and progress.
//!
//! [`FrameBuilder::start`] cuts the image in tiles and starts a pool of workers. Each worker
//! pulls the next tile from a shared cursor, renders it into a buffer of its own and sends it
//! back to the [`Frame`] over a channel. The frame is the only one writing into the
//! [`OutputImage`], so pixels never need a lock; progress is tracked with atomic counters that
//! can be polled at any time without slowing the workers down.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        mpsc::{channel, Receiver, Sender},
        Arc, OnceLock,
    },
    time::{Duration, Instant},
};

use crate::{
    camera::RayGenerator,
    error::{ConfigError, FrameError},
    integrators::Integrator,
    output::OutputImage,
    sampler::{render_pixel, Sampling, SamplingPolicy},
    scene::Scene,
    tile::{Tile, Tiler},
    utils::timer::format_elapsed,
};

/// `max(2 * available cores, 2)`
pub fn default_workers() -> usize {
    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    usize::max(2 * cores, 2)
}

#[derive(Debug, Clone)]
pub struct FrameBuilder {
    pub workers: usize,
    pub policy: SamplingPolicy,
    pub tile_size: u32,
    pub seed: u64,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            policy: SamplingPolicy::default(),
            tile_size: 32,
            seed: 0,
        }
    }
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
    pub fn max_samples(mut self, max_samples: u32) -> Self {
        self.policy.max_samples = max_samples;
        self
    }
    pub fn min_samples(mut self, min_samples: u32) -> Self {
        self.policy.min_samples = min_samples;
        self
    }
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.policy.max_depth = max_depth;
        self
    }
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.policy.sampling = sampling;
        self
    }
    pub fn tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration and start rendering in the background
    pub fn start(
        self,
        scene: Arc<Scene>,
        viewport: Arc<dyn RayGenerator>,
        integrator: Arc<dyn Integrator>,
    ) -> Result<Frame, ConfigError> {
        let (width, height) = (viewport.width(), viewport.height());
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage { width, height });
        }
        self.policy.validate()?;

        let tiler = Tiler {
            width,
            height,
            tile_size: self.tile_size,
        };
        let jobs: Vec<Job> = tiler
            .tiles()
            .map(|tile| Job {
                tile,
                done: AtomicBool::new(false),
            })
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("tracer-worker-{i}"))
            .build()?;

        log::info!(
            "Rendering {width}x{height}: {} tiles of {}px, {} workers, {:?}",
            jobs.len(),
            self.tile_size,
            self.workers,
            self.policy,
        );

        let shared = Arc::new(FrameShared {
            jobs,
            next_job: AtomicUsize::new(0),
            active_jobs: AtomicUsize::new(0),
            completed_jobs: AtomicUsize::new(0),
            completed_pixels: AtomicU64::new(0),
            total_pixels: width as u64 * height as u64,
            samples: AtomicU64::new(0),
            rays: AtomicU64::new(0),
            started: Instant::now(),
            finished: OnceLock::new(),
        });
        let render = Arc::new(RenderContext {
            scene,
            viewport,
            integrator,
            policy: self.policy,
            seed: self.seed,
        });

        let (tx, rx) = channel();
        for _ in 0..self.workers {
            let shared = shared.clone();
            let render = render.clone();
            let tx = tx.clone();
            pool.spawn(move || worker_loop(&shared, &render, tx));
        }

        Ok(Frame {
            shared,
            receiver: rx,
            image: OutputImage::new(width, height),
            received: 0,
            _pool: pool,
        })
    }
}

struct Job {
    tile: Tile,
    done: AtomicBool,
}

/// State shared between the frame and its workers
struct FrameShared {
    jobs: Vec<Job>,
    /// Index of the next job to hand out
    next_job: AtomicUsize,
    active_jobs: AtomicUsize,
    completed_jobs: AtomicUsize,
    completed_pixels: AtomicU64,
    total_pixels: u64,
    samples: AtomicU64,
    rays: AtomicU64,
    started: Instant,
    finished: OnceLock<Duration>,
}

/// Everything a worker reads to render a pixel
struct RenderContext {
    scene: Arc<Scene>,
    viewport: Arc<dyn RayGenerator>,
    integrator: Arc<dyn Integrator>,
    policy: SamplingPolicy,
    seed: u64,
}

/// A rendered tile, row by row
pub struct TileMsg {
    pub tile: Tile,
    pub pixels: Vec<[u8; 3]>,
}

fn worker_loop(shared: &FrameShared, render: &RenderContext, tx: Sender<TileMsg>) {
    loop {
        let idx = shared.next_job.fetch_add(1, Ordering::Relaxed);
        let Some(job) = shared.jobs.get(idx) else {
            break;
        };
        shared.active_jobs.fetch_add(1, Ordering::Relaxed);
        log::trace!("working on tile {:?}", job.tile);

        let pixels = render_tile(shared, render, job.tile);
        let sent = tx.send(TileMsg {
            tile: job.tile,
            pixels,
        });

        job.done.store(true, Ordering::Release);
        shared.active_jobs.fetch_sub(1, Ordering::Relaxed);
        let completed = shared.completed_jobs.fetch_add(1, Ordering::AcqRel) + 1;
        if completed == shared.jobs.len() {
            // Only the worker completing the last job gets here
            let _ = shared.finished.set(shared.started.elapsed());
        }

        if sent.is_err() {
            log::debug!("frame dropped, worker stopping");
            break;
        }
    }
}

fn render_tile(shared: &FrameShared, render: &RenderContext, tile: Tile) -> Vec<[u8; 3]> {
    let mut pixels = Vec::with_capacity(tile.len());
    for (x, y) in tile.pixels() {
        let res = render_pixel(
            &render.scene,
            render.viewport.as_ref(),
            render.integrator.as_ref(),
            &render.policy,
            render.seed,
            (x, y),
        );
        shared.samples.fetch_add(res.samples as u64, Ordering::Relaxed);
        shared.rays.fetch_add(res.rays, Ordering::Relaxed);
        shared.completed_pixels.fetch_add(1, Ordering::Relaxed);
        pixels.push(res.color.to_byte_array());
    }
    pixels
}

/// Time left if the rest of the frame goes as fast as the `progress` done in `elapsed` seconds
pub fn estimate_time_to_finish(elapsed: f32, progress: f32) -> f32 {
    if progress >= 1.0 {
        0.0
    } else if progress <= 0.0 {
        f32::INFINITY
    } else {
        elapsed / progress * (1.0 - progress)
    }
}

/// Snapshot of a frame's progress
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
#[display(
    "active jobs={active_jobs}, progress={progress:.2}, time_to_finish={time_to_finish:.2}s, total_time={time_total:.2}s, rays_ps={rays_per_second:.2}"
)]
pub struct FrameStats {
    pub active_jobs: usize,
    pub progress: f32,
    pub time_to_finish: f32,
    pub time_total: f32,
    pub rays_per_second: f32,
}

/// A frame being rendered.
///
/// Runs to completion once started; dropping it makes the workers stop after their current
/// tile.
pub struct Frame {
    shared: Arc<FrameShared>,
    receiver: Receiver<TileMsg>,
    image: OutputImage,
    received: usize,
    _pool: rayon::ThreadPool,
}

impl Frame {
    /// Copy the tiles rendered since the last call into the image. Returns how many there were.
    pub fn update(&mut self) -> usize {
        let mut count = 0;
        for msg in self.receiver.try_iter() {
            self.image.write_tile(&msg.tile, &msg.pixels);
            count += 1;
        }
        self.received += count;
        count
    }

    pub fn image(&self) -> &OutputImage {
        &self.image
    }

    pub fn job_count(&self) -> usize {
        self.shared.jobs.len()
    }

    pub fn active_jobs(&self) -> usize {
        self.shared.active_jobs.load(Ordering::Relaxed)
    }

    /// Whether the tile of job `idx` is rendered
    pub fn is_job_done(&self, idx: usize) -> bool {
        self.shared
            .jobs
            .get(idx)
            .is_some_and(|job| job.done.load(Ordering::Acquire))
    }

    /// Fraction of pixels rendered, in [0; 1]
    pub fn progress(&self) -> f32 {
        let done = self.shared.completed_pixels.load(Ordering::Relaxed);
        (done as f64 / self.shared.total_pixels as f64).clamp(0.0, 1.0) as f32
    }

    /// Seconds since the start, frozen once the frame is finished
    pub fn time_total(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    fn elapsed(&self) -> Duration {
        self.shared
            .finished
            .get()
            .copied()
            .unwrap_or_else(|| self.shared.started.elapsed())
    }

    /// Estimated seconds left, infinite until something is rendered
    pub fn time_to_finish(&self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }
        estimate_time_to_finish(self.time_total(), self.progress())
    }

    pub fn rays_per_second(&self) -> f32 {
        let time = self.time_total();
        if time <= 0.0 {
            return 0.0;
        }
        self.shared.rays.load(Ordering::Relaxed) as f32 / time
    }

    pub fn samples(&self) -> u64 {
        self.shared.samples.load(Ordering::Relaxed)
    }

    pub fn rays(&self) -> u64 {
        self.shared.rays.load(Ordering::Relaxed)
    }

    /// Every job reported completion. Their tiles may still be waiting for [`Frame::update`].
    pub fn is_finished(&self) -> bool {
        self.shared.completed_jobs.load(Ordering::Acquire) == self.shared.jobs.len()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            active_jobs: self.active_jobs(),
            progress: self.progress(),
            time_to_finish: self.time_to_finish(),
            time_total: self.time_total(),
            rays_per_second: self.rays_per_second(),
        }
    }

    /// Block until every tile is in the image and return it
    pub fn wait(mut self) -> Result<OutputImage, FrameError> {
        self.update();
        let expected = self.job_count();
        while self.received < expected {
            match self.receiver.recv() {
                Ok(msg) => {
                    self.image.write_tile(&msg.tile, &msg.pixels);
                    self.received += 1;
                }
                Err(_) => {
                    return Err(FrameError::Disconnected {
                        received: self.received,
                        expected,
                    })
                }
            }
        }

        log::info!(
            "Frame rendered in {}: {} samples, {} rays",
            format_elapsed(self.elapsed()),
            self.samples(),
            self.rays()
        );
        Ok(self.image)
    }
}
