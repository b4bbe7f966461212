//! Ember Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over analytic primitives (spheres, moving
//! spheres, axis-aligned rectangles), accelerated by a bounding volume
//! hierarchy and rendered in parallel buckets.

mod bucket;
mod bvh;
mod camera;
mod hittable;
mod material;
mod moving_sphere;
mod perlin;
mod rect;
mod renderer;
mod scheduler;
pub mod scenes;
mod sphere;
mod texture;
mod world;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterContext, ScatterResult,
};
pub use moving_sphere::MovingSphere;
pub use perlin::Perlin;
pub use rect::{Axis, AxisRect};
pub use renderer::{gamma_correct, ray_cast, render_pixel, sky_gradient, Background, RenderConfig};
pub use scheduler::{RenderError, RenderResult, RenderScheduler};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
pub use world::World;

/// Re-export math and image types used throughout the public API
pub use ember_core::ImageBuffer;
pub use ember_math::{Aabb, Color, Interval, Point3, Ray, Vec3};

/// Smallest ray parameter accepted as a hit; keeps scattered rays from
/// re-hitting the surface they start on.
pub const HIT_EPSILON: f64 = 1e-6;
