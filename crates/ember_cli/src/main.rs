use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ember_core::{load_scene, SceneDescription};
use ember_renderer::{scenes, RenderScheduler, World};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod logger;

use cli::{Args, Preset};
use logger::init_logger;

/// Scene to render: the given file, or the selected preset when there is none.
fn scene_for(args: &Args, rng: &mut StdRng) -> SceneDescription {
    let mut scene = match &args.scene {
        Some(path) => match load_scene(path) {
            Ok(scene) => scene,
            Err(e) => {
                error!("{e}; rendering an empty scene instead");
                SceneDescription::default()
            }
        },
        None => {
            info!("No scene file given, using the {:?} preset", args.preset);
            match args.preset {
                Preset::Sample => scenes::sample_scene(),
                Preset::Random => scenes::random_scene(rng),
            }
        }
    };

    if args.bvh {
        scene.use_bvh = true;
    }
    scene
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("Starting Ember");

    let config = args.render_config();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let start = Instant::now();
    let scene = scene_for(&args, &mut rng);
    let world = World::from_description(&scene, config.aspect_ratio(), &mut rng);
    info!("World built in {:.2?}", start.elapsed());

    let scheduler =
        RenderScheduler::from_config(&config).context("Failed to start render workers")?;
    let image = scheduler.render(&world, &config).context("Render failed")?;

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write image to {}", args.output.display()))?;

    info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
