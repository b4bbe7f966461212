//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a maximum depth
//! - Emission from light sources at every bounce
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction

use ember_math::sampling::random_unit;
use rand::RngCore;

use crate::{
    Camera, Color, Hittable, Interval, Ray, RenderError, RenderResult, ScatterContext, World,
    DEFAULT_BUCKET_SIZE, HIT_EPSILON,
};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Number of render worker threads
    pub threads: usize,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
    /// Base seed every bucket's rng is derived from
    pub seed: u64,
    /// Exponent applied to each channel of the averaged color
    pub gamma: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 711,
            height: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: 0,
            gamma: 0.45,
        }
    }
}

impl RenderConfig {
    /// Config for a `width` x `height` image with default quality settings.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    /// Check the settings describe a renderable image.
    pub fn validate(&self) -> RenderResult<()> {
        let problem = if self.width == 0 || self.height == 0 {
            Some(format!("image size {}x{} is empty", self.width, self.height))
        } else if self.samples_per_pixel == 0 {
            Some("samples per pixel must be at least 1".to_string())
        } else if self.threads == 0 {
            Some("thread count must be at least 1".to_string())
        } else if self.bucket_size == 0 {
            Some("bucket size must be at least 1".to_string())
        } else if !self.gamma.is_finite() || self.gamma <= 0.0 {
            Some(format!("gamma {} is not a positive number", self.gamma))
        } else {
            None
        };

        match problem {
            Some(message) => Err(RenderError::InvalidConfig(message)),
            None => Ok(()),
        }
    }
}

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Background {
    /// White-to-blue gradient over the ray's elevation
    #[default]
    Sky,
    Solid(Color),
}

impl Background {
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ember_math::normalize_or(ray.direction, ember_math::Vec3::Y);
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Compute the color seen by a ray.
///
/// `depth` is the number of bounces still allowed. Once it is used up the
/// surface contributes only its own emission.
pub fn ray_cast(
    ray: &Ray,
    world: &dyn Hittable,
    background: &Background,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::new(HIT_EPSILON, f64::INFINITY)) else {
        return background.color(ray);
    };

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    let Some(next_depth) = depth.checked_sub(1) else {
        return emission;
    };

    let ctx = ScatterContext::from_hit(&rec);
    match rec.material.scatter(&ctx, rng) {
        Some(result) => {
            let bounced = ray_cast(&result.scattered, world, background, next_depth, rng);
            emission + result.attenuation * bounced
        }
        // Absorbed
        None => emission,
    }
}

/// Clamp negative and non-finite channels to zero, then raise each channel
/// to `gamma`.
pub fn gamma_correct(color: Color, gamma: f64) -> Color {
    let channel = |c: f64| {
        if c.is_finite() && c > 0.0 {
            c.powf(gamma)
        } else {
            0.0
        }
    };
    Color::new(channel(color.x), channel(color.y), channel(color.z))
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` counts from the lower-left corner of the image. Samples map to
/// `(x + ξ) / (width - 1)`, so jitter in the last column and row reaches just
/// past the viewport edge (`s, t` slightly above 1).
pub fn render_pixel(
    x: u32,
    y: u32,
    camera: &Camera,
    world: &World,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let s_span = config.width.saturating_sub(1).max(1) as f64;
    let t_span = config.height.saturating_sub(1).max(1) as f64;
    let samples = config.samples_per_pixel.max(1);

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let s = (x as f64 + random_unit(rng)) / s_span;
        let t = (y as f64 + random_unit(rng)) / t_span;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_cast(&ray, world.root(), world.background(), config.max_depth, rng);
    }

    gamma_correct(pixel_color / samples as f64, config.gamma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffuseLight, HittableList, Lambertian, Point3, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn single_sphere(material: Arc<dyn crate::Material>) -> HittableList {
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -2.0), 1.0, material)));
        world
    }

    fn toward_sphere() -> Ray {
        Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new_simple(Point3::ZERO, Vec3::Y));
        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);

        let down = sky_gradient(&Ray::new_simple(Point3::ZERO, -Vec3::Y));
        assert!((down - Color::ONE).length() < 1e-12);

        let level = sky_gradient(&Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -3.0)));
        assert!((level - Color::new(0.75, 0.85, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_miss_returns_background() {
        let mut rng = StdRng::seed_from_u64(0);
        let world = HittableList::new();
        let ray = Ray::new_simple(Point3::ZERO, Vec3::Y);
        let solid = Background::Solid(Color::new(0.2, 0.3, 0.4));

        assert_eq!(ray_cast(&ray, &world, &solid, 10, &mut rng), Color::new(0.2, 0.3, 0.4));
        assert_eq!(ray_cast(&ray, &world, &Background::Sky, 0, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_exhausted_depth_is_black() {
        let mut rng = StdRng::seed_from_u64(0);
        let world = single_sphere(Arc::new(Lambertian::from_color(Color::ONE)));

        let color = ray_cast(&toward_sphere(), &world, &Background::Sky, 0, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_emission_is_added() {
        let mut rng = StdRng::seed_from_u64(0);
        let world = single_sphere(Arc::new(DiffuseLight::from_color(Color::new(2.0, 3.0, 4.0))));

        for depth in [0, 1, 50] {
            let color = ray_cast(&toward_sphere(), &world, &Background::Sky, depth, &mut rng);
            assert_eq!(color, Color::new(2.0, 3.0, 4.0));
        }
    }

    #[test]
    fn test_one_bounce_is_attenuated_background() {
        let mut rng = StdRng::seed_from_u64(0);
        let world = single_sphere(Arc::new(Lambertian::from_color(Color::splat(0.5))));
        let background = Background::Solid(Color::ONE);

        // A single convex sphere: every bounce escapes
        let color = ray_cast(&toward_sphere(), &world, &background, 1, &mut rng);
        assert!((color - Color::splat(0.5)).length() < 1e-12);
    }

    #[test]
    fn test_gamma_correct() {
        let corrected = gamma_correct(Color::new(-1.0, f64::NAN, 0.25), 0.5);
        assert_eq!(corrected, Color::new(0.0, 0.0, 0.5));

        let inf = gamma_correct(Color::new(f64::INFINITY, 1.0, 0.0), 0.45);
        assert_eq!(inf, Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_validate_config() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(RenderConfig::with_size(0, 10).validate().is_err());

        let mut config = RenderConfig::with_size(4, 4);
        config.samples_per_pixel = 0;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::with_size(4, 4);
        config.gamma = -1.0;
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.samples_per_pixel, 100);
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.gamma, 0.45);
        assert!(config.threads >= 1);
    }
}
