use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use lumen_core::{open_sink, SceneConfig};
use lumen_renderer::Scene;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod scenes;
use scenes::ScenePreset;

#[derive(Debug, Parser)]
#[command(version, about = "Offline stochastic ray tracer", long_about = None)]
struct Args {
    /// the scene parameter file (JSON)
    config: PathBuf,
    /// where to write the image; `.ppm` gives plain PPM, other extensions go
    /// through the image encoders. Streams PPM to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// the built-in scene to render, overriding the config file
    #[arg(long, value_enum)]
    scene: Option<ScenePreset>,
    /// the number of rays averaged per pixel
    #[arg(short, long)]
    samples: Option<u32>,
    /// the maximum number of bounces per path
    #[arg(long)]
    max_depth: Option<u32>,
    /// seed for scene construction and sampling
    #[arg(long)]
    seed: Option<u64>,
    /// log per-scanline progress
    #[arg(short, long)]
    verbose: bool,
}

/// Apply command line overrides and re-check the result.
fn resolve_config(args: &Args) -> Result<SceneConfig> {
    let mut config = SceneConfig::load(&args.config)
        .with_context(|| format!("Failed to load scene config {}", args.config.display()))?;

    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate().context("Invalid command line override")?;

    Ok(config)
}

fn resolve_preset(args: &Args, config: &SceneConfig) -> Result<ScenePreset> {
    if let Some(preset) = args.scene {
        return Ok(preset);
    }
    match config.scene.as_deref() {
        None => Ok(ScenePreset::default()),
        Some(name) => {
            ScenePreset::from_str(name, true).map_err(|_| anyhow!("Unknown scene `{name}`"))
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = resolve_config(&args)?;
    let preset = resolve_preset(&args, &config)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Scene {:?}, seed {}", preset, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let world = preset.build(&mut rng);
    log::info!("Built {} top-level objects", world.len());
    let scene = Scene::from_config(&config, world);

    let mut sink = open_sink(args.output.as_deref()).context("Failed to open output")?;
    scene
        .render_to(sink.as_mut(), &mut rng)
        .context("Failed to write image")?;

    log::info!("Done");
    Ok(())
}
