//! Simple path tracer example.
//!
//! Renders the built-in sample scene at a small size and saves it as PPM.

use ember_renderer::{scenes, RenderConfig, RenderScheduler, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RenderConfig {
        samples_per_pixel: 50,
        max_depth: 10,
        bucket_size: 16,
        ..RenderConfig::with_size(400, 225)
    };

    // Build the scene
    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let world = World::from_description(&scenes::sample_scene(), config.aspect_ratio(), &mut rng);
    println!("Scene built in {:?}", start.elapsed());

    let scheduler = match RenderScheduler::from_config(&config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            eprintln!("Cannot start renderer: {e}");
            std::process::exit(1);
        }
    };

    let image = match scheduler.render(&world, &config) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Render failed: {e}");
            std::process::exit(1);
        }
    };

    let filename = "output.ppm";
    if let Err(e) = image.save(filename) {
        eprintln!("Failed to save {filename}: {e}");
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}
