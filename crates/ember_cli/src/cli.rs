use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ember_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scene rendered when no scene file is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Three spheres on a ground sphere
    Sample,
    /// Large random field of spheres with motion blur
    Random,
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "An offline path tracer", version)]
pub struct Args {
    /// Image height in pixels (width is height * 16 / 9)
    #[arg(default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Scene file to render
    pub scene: Option<PathBuf>,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, short = 'd', default_value_t = 50)]
    pub depth: u32,

    /// Render threads (defaults to the number of CPUs)
    #[arg(long, short = 't', value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Option<u32>,

    /// Edge length of a render bucket in pixels
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub bucket_size: u32,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Output file path (.png writes PNG, anything else plain PPM)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Built-in scene used when no scene file is given
    #[arg(long, value_enum, default_value_t = Preset::Sample)]
    pub preset: Preset,

    /// Build a BVH even if the scene does not ask for one
    #[arg(long)]
    pub bvh: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Image width for the requested height at 16:9, saturating at `u32::MAX`.
    pub fn width(&self) -> u32 {
        u32::try_from(self.height as u64 * 16 / 9)
            .unwrap_or(u32::MAX)
            .max(1)
    }

    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig {
            samples_per_pixel: self.samples,
            max_depth: self.depth,
            bucket_size: self.bucket_size,
            seed: self.seed,
            ..RenderConfig::with_size(self.width(), self.height)
        };
        if let Some(threads) = self.threads {
            config.threads = threads as usize;
        }
        config
    }
}
