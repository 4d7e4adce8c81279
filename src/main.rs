use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fieldtrace::prelude::*;
use log::info;

/// Render particles tracing paths through a 2D vector field.
#[derive(Parser, Debug)]
#[command(name = "fieldtrace", version, about)]
struct Args {
    /// Scene configuration (JSON). Defaults are used for missing keys.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (png) or file (jsonl).
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// Override the velocity field.
    #[arg(long, value_enum)]
    field: Option<FieldArg>,

    /// Override the scene length in seconds.
    #[arg(long)]
    duration: Option<f32>,

    /// Override the output frame rate.
    #[arg(long)]
    fps: Option<f32>,

    /// Seed for a reproducible particle layout.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Png,
    Jsonl,
    None,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldArg {
    Circular,
    Spiral,
    Hyperbolic,
}

impl From<FieldArg> for VectorField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Circular => VectorField::Circular,
            FieldArg::Spiral => VectorField::Spiral,
            FieldArg::Hyperbolic => VectorField::Hyperbolic,
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(field) = args.field {
        config.field = field.into();
    }
    if let Some(duration) = args.duration {
        config.duration = duration;
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate().context("invalid configuration")?;

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut time = Time::new(config.fps);
    let frames = time.total_frames(config.duration);
    let mut scene = Simulation::from_config(config).build();

    let mut sink: Box<dyn FrameSink> = match args.format {
        Format::Png => Box::new(PngSequence::new(&args.out)?),
        Format::Jsonl => Box::new(JsonLines::create(&args.out)?),
        Format::None => Box::new(NullSink),
    };

    info!("stepping {} frames at {} fps", frames, time.fps());
    scene
        .run(&mut time, frames, sink.as_mut())
        .with_context(|| format!("writing frames to {}", args.out.display()))?;
    Ok(())
}
