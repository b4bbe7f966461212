//! Parallel render scheduler.
//!
//! A fixed rayon pool runs one worker loop per thread. Workers pull buckets
//! from a shared queue until it is empty and keep their results; once every
//! worker has returned, the results are copied into the output image.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;

use crate::{
    generate_buckets, render_bucket, Bucket, BucketResult, ImageBuffer, RenderConfig, World,
};

/// Errors that stop a render before it starts.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Owns the worker pool and drives bucket rendering.
pub struct RenderScheduler {
    pool: ThreadPool,
}

impl RenderScheduler {
    /// Create a scheduler with `threads` workers.
    pub fn new(threads: usize) -> RenderResult<Self> {
        if threads == 0 {
            return Err(RenderError::InvalidConfig(
                "thread count must be at least 1".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ember-render-{i}"))
            .build()?;

        Ok(Self { pool })
    }

    /// Create a scheduler sized by `config.threads`.
    pub fn from_config(config: &RenderConfig) -> RenderResult<Self> {
        Self::new(config.threads)
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Render `world` into a new image.
    ///
    /// Every pixel is written exactly once. For a given world and config the
    /// output does not depend on the number of workers.
    pub fn render(&self, world: &World, config: &RenderConfig) -> RenderResult<ImageBuffer> {
        config.validate()?;

        let buckets = generate_buckets(config.width, config.height, config.bucket_size);
        let bucket_count = buckets.len();
        let queue = Mutex::new(VecDeque::from(buckets));

        info!(
            "Rendering {}x{} at {} spp, depth {}: {} buckets on {} threads",
            config.width,
            config.height,
            config.samples_per_pixel,
            config.max_depth,
            bucket_count,
            self.threads()
        );
        let start = Instant::now();

        // Returns only after every worker loop has finished
        let per_worker: Vec<Vec<BucketResult>> = self.pool.broadcast(|ctx| {
            let mut results = Vec::new();
            while let Some(bucket) = next_bucket(&queue) {
                results.push(render_bucket(&bucket, world, config));
            }
            debug!("Worker {} rendered {} buckets", ctx.index(), results.len());
            results
        });

        let mut image = ImageBuffer::new(config.width, config.height);
        for result in per_worker.iter().flatten() {
            write_bucket(&mut image, result);
        }

        info!("Rendered {} buckets in {:.2?}", bucket_count, start.elapsed());
        Ok(image)
    }
}

fn next_bucket(queue: &Mutex<VecDeque<Bucket>>) -> Option<Bucket> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}

fn write_bucket(image: &mut ImageBuffer, result: &BucketResult) {
    let bucket = &result.bucket;
    let width = bucket.width.max(1) as usize;

    for (i, color) in result.pixels.iter().enumerate() {
        let x = bucket.x + (i % width) as u32;
        let y = bucket.y + (i / width) as u32;
        image.set(x, y, *color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gamma_correct, Background, Camera, Color, HittableList, Lambertian, Point3, Sphere,
    };
    use ember_core::ppm::write_ppm;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    const GAMMA: f64 = 0.45;

    fn test_world(use_bvh: bool) -> World {
        let mut objects = HittableList::new();
        objects.add(Arc::new(Sphere::new(
            Point3::new(0.0, -100.5, 0.0),
            100.0,
            Arc::new(Lambertian::from_color(Color::new(0.8, 0.8, 0.0))),
        )));
        objects.add(Arc::new(Sphere::new(
            Point3::ZERO,
            0.5,
            Arc::new(Lambertian::from_color(Color::new(0.7, 0.3, 0.3))),
        )));

        let camera = Camera::new().with_aspect_ratio(32.0 / 18.0);
        World::new(
            camera,
            objects,
            use_bvh,
            Background::Sky,
            &mut StdRng::seed_from_u64(0),
        )
    }

    fn config(threads: usize, bucket_size: u32) -> RenderConfig {
        RenderConfig {
            width: 32,
            height: 18,
            samples_per_pixel: 1,
            max_depth: 0,
            threads,
            bucket_size,
            seed: 1234,
            gamma: GAMMA,
        }
    }

    fn render(world: &World, config: &RenderConfig) -> ImageBuffer {
        RenderScheduler::from_config(config)
            .unwrap()
            .render(world, config)
            .unwrap()
    }

    #[test]
    fn test_render_is_deterministic_across_thread_counts() {
        let world = test_world(false);

        let single = render(&world, &config(1, 1));
        let again = render(&world, &config(1, 1));
        let parallel = render(&world, &config(4, 1));

        assert_eq!(single.pixels, again.pixels);
        assert_eq!(single.pixels, parallel.pixels);

        let tiled = render(&world, &config(1, 5));
        let tiled_parallel = render(&world, &config(3, 5));
        assert_eq!(tiled.pixels, tiled_parallel.pixels);
    }

    #[test]
    fn test_bvh_does_not_change_image() {
        let linear = render(&test_world(false), &config(2, 4));
        let bvh = render(&test_world(true), &config(2, 4));
        assert_eq!(linear.pixels, bvh.pixels);
    }

    #[test]
    fn test_depth_zero_surfaces_black_and_sky_gradient() {
        let world = test_world(false);
        let image = render(&world, &config(2, 1));
        assert_eq!((image.width, image.height), (32, 18));

        // Centre pixel sees the small sphere, the bottom row the ground
        assert_eq!(image.get(16, 9), Color::ZERO);
        for x in 0..32 {
            assert_eq!(image.get(x, 0), Color::ZERO);
        }

        // Top row looks 45 degrees up into the sky
        for x in 0..32 {
            let pixel = image.get(x, 17);
            let linear = pixel.powf(1.0 / GAMMA);
            let a = (1.0 - linear.x) / 0.5;

            assert!((linear.z - 1.0).abs() < 1e-9);
            assert!(a > 0.5 && a <= 1.0, "sky blend {a} out of range");
            assert!((linear.y - (1.0 - 0.3 * a)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_depth_zero_matches_reference_image() {
        // Pinhole camera, 1 spp, seed 1234, one pixel per bucket
        let expected = include_str!("../tests/data/depth0_32x18.ppm");
        let image = render(&test_world(false), &config(2, 1));

        let mut ppm = Vec::new();
        write_ppm(&image, &mut ppm).unwrap();
        let rendered = String::from_utf8(ppm).unwrap();

        assert_eq!(rendered.lines().count(), expected.lines().count());
        for (i, (got, want)) in rendered.lines().zip(expected.lines()).enumerate() {
            assert_eq!(got, want, "reference image differs at line {}", i + 1);
        }
    }

    #[test]
    fn test_every_pixel_written() {
        let world = test_world(false);
        let mut cfg = config(3, 7);
        cfg.max_depth = 4;
        let image = render(&world, &cfg);

        assert_eq!(image.pixels.len(), 32 * 18);
        // With bounces the sky lights most surfaces
        let lit = image.pixels.iter().filter(|p| p.max_element() > 0.0).count();
        assert!(lit > image.pixels.len() / 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let world = test_world(false);
        let scheduler = RenderScheduler::new(1).unwrap();

        let mut cfg = config(1, 1);
        cfg.width = 0;
        assert!(matches!(
            scheduler.render(&world, &cfg),
            Err(RenderError::InvalidConfig(_))
        ));
        assert!(RenderScheduler::new(0).is_err());
    }

    #[test]
    fn test_gamma_matches_render_pixel() {
        // Sky pixels are the gamma-corrected gradient, never brighter than white
        let image = render(&test_world(false), &config(1, 1));
        let white = gamma_correct(Color::ONE, GAMMA);
        assert!(image.pixels.iter().all(|p| p.cmple(white + 1e-12).all()));
    }
}
