mod cli;
mod output;
mod progress;
mod scenes;

use std::{io::Write, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use progress::PercentBar;
use tracer::{
    camera::Viewport, integrators::PathTracer, utils::counter::report_counters,
    utils::timer::timed_scope_log,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("loading scene {:?}", args.scene);
    let demo = args.scene.create().context("can't create the scene")?;
    let scene = timed_scope_log("Build scene", || demo.builder.build(args.accelerator()))
        .context("can't build the scene")?;

    let viewport = Viewport::new(demo.camera, args.dimensions.width, args.dimensions.height);
    let image = timed_scope_log("Render frame", || -> Result<_> {
        let mut frame = args
            .frame_builder()
            .start(Arc::new(scene), Arc::new(viewport), Arc::new(PathTracer::default()))
            .context("can't start rendering")?;

        let interval = Duration::from_millis(args.report_interval_ms.max(1));
        while !frame.is_finished() {
            std::thread::sleep(interval);
            frame.update();
            let stats = frame.stats();
            print!(
                "\r{} {stats}",
                PercentBar {
                    percent: stats.progress,
                    width: 30
                }
            );
            // The progress line is best effort
            let _ = std::io::stdout().flush();
        }
        println!();

        Ok(frame.wait()?)
    })?;

    output::save_image(&image, &args.output, args.quality)?;

    log::info!("Done");
    report_counters();
    Ok(())
}
