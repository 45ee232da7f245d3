//! `lux`: render a JSON scene to a PNG image.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lux_renderer::{render, RenderOptions, SurfaceList};

/// Path trace a scene file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene description (JSON)
    scene: PathBuf,

    /// Output image; defaults to the scene path with a `.png` extension
    image: Option<PathBuf>,

    /// Vertical resolution; the width follows the camera's aspect ratio
    #[arg(short = 'r', long = "resolution", value_name = "PIXELS")]
    resolution: Option<u32>,

    /// Number of render threads [default: number of CPUs]
    #[arg(short = 'j', long = "threads", value_name = "NUM")]
    threads: Option<usize>,

    /// Base seed of the per-pixel random streams
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

impl Args {
    fn output_path(&self) -> PathBuf {
        self.image
            .clone()
            .unwrap_or_else(|| default_output_path(&self.scene))
    }

    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default();
        if let Some(threads) = self.threads {
            options = options.with_workers(threads);
        }
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        options
    }
}

/// The scene path with its extension replaced by `png`.
fn default_output_path(scene: &Path) -> PathBuf {
    scene.with_extension("png")
}

fn run(args: &Args) -> Result<()> {
    let mut scene = lux_core::load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    if let Some(resolution) = args.resolution {
        scene.set_resolution(resolution);
    }

    let intersector = SurfaceList::from_scene(&scene);
    let output = args.output_path();

    let start = Instant::now();
    let image = render(&scene, &intersector, &args.render_options()).context("render failed")?;
    log::info!("Rendered in {:.2?}", start.elapsed());

    image
        .save_png(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("Saved {}", output.display());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}
