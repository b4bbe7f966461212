//! Camera for ray generation.

use ember_math::normalize_or;
use ember_math::sampling::{random_in_unit_disk, random_range};
use rand::RngCore;

use crate::{Point3, Ray, Vec3};

/// Thin-lens camera with a shutter interval.
///
/// Configure with the `with_*` builders, then call [`Camera::initialize`]
/// before generating rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f64, // Vertical field of view in degrees
    lens_radius: f64,
    focus_dist: f64, // Distance from camera to plane of perfect focus

    // Shutter
    time0: f64,
    time1: f64,

    aspect_ratio: f64,

    // Cached computed values (set by initialize())
    lower_left: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            look_from: Point3::new(0.0, 0.0, 1.0),
            look_at: Point3::ZERO,
            vup: Vec3::Y,
            vfov: 90.0,
            lens_radius: 0.0,
            focus_dist: 1.0,
            time0: 0.0,
            time1: 1.0,
            aspect_ratio: 16.0 / 9.0,
            lower_left: Point3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, lens_radius: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.lens_radius = lens_radius;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the shutter open and close times.
    pub fn with_shutter(mut self, time0: f64, time1: f64) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }

    /// Set the image aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan() * self.focus_dist;
        let viewport_width = viewport_height * self.aspect_ratio;

        // Calculate camera basis vectors
        self.w = normalize_or(self.look_from - self.look_at, Vec3::Z);
        self.u = normalize_or(self.vup.cross(self.w), Vec3::X);
        self.v = self.w.cross(self.u);

        self.horizontal = viewport_width * self.u;
        self.vertical = viewport_height * self.v;
        self.lower_left = self.look_from
            - self.horizontal / 2.0
            - self.vertical / 2.0
            - self.focus_dist * self.w;
    }

    /// Generate a ray through viewport coordinates `(s, t)`, where (0, 0) is
    /// the lower-left corner and (1, 1) the upper-right.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let origin = if self.lens_radius <= 0.0 {
            self.look_from
        } else {
            let disk = self.lens_radius * random_in_unit_disk(rng);
            self.look_from + disk.x * self.u + disk.y * self.v
        };

        let target = self.lower_left + s * self.horizontal + t * self.vertical;
        let direction = normalize_or(target - origin, -self.w);
        let time = random_range(rng, self.time0, self.time1);

        Ray::new(origin, direction, time)
    }

    pub fn look_from(&self) -> Point3 {
        self.look_from
    }

    /// Shutter interval as `(open, close)`.
    pub fn shutter(&self) -> (f64, f64) {
        (self.time0, self.time1)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Orthonormal basis `(u, v, w)`; `w` points away from the view direction.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn initialized(camera: Camera) -> Camera {
        let mut camera = camera;
        camera.initialize();
        camera
    }

    #[test]
    fn test_camera_basis_is_orthonormal() {
        let camera = initialized(Camera::new().with_position(
            Point3::new(13.0, 2.0, 3.0),
            Point3::ZERO,
            Vec3::Y,
        ));
        let (u, v, w) = camera.basis();

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-12);
        }
        assert!(u.dot(v).abs() < 1e-12);
        assert!(u.dot(w).abs() < 1e-12);
        assert!(v.dot(w).abs() < 1e-12);
        assert!((w - Point3::new(13.0, 2.0, 3.0).normalize()).length() < 1e-12);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = initialized(Camera::new());
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin, Point3::new(0.0, 0.0, 1.0));
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_corner_rays_span_field_of_view() {
        let camera = initialized(Camera::new().with_aspect_ratio(1.0));
        let mut rng = StdRng::seed_from_u64(0);

        // 90 degree vfov: the top edge is 45 degrees above the view axis
        let top = camera.get_ray(0.5, 1.0, &mut rng).direction;
        assert!((top - Vec3::new(0.0, 1.0, -1.0).normalize()).length() < 1e-12);

        let lower_left = camera.get_ray(0.0, 0.0, &mut rng).direction;
        assert!(lower_left.x < 0.0 && lower_left.y < 0.0);
    }

    #[test]
    fn test_lens_jitters_origin_within_radius() {
        let camera = initialized(Camera::new().with_lens(40.0, 0.25, 4.0));
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let ray = camera.get_ray(0.3, 0.7, &mut rng);
            let offset = ray.origin - camera.look_from();
            assert!(offset.length() < 0.25 + 1e-12);
            assert!(offset.z.abs() < 1e-12);
            assert!((ray.direction.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ray_times_within_shutter() {
        let camera = initialized(Camera::new().with_shutter(0.25, 0.5));
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..200 {
            let time = camera.get_ray(0.5, 0.5, &mut rng).time;
            assert!((0.25..=0.5).contains(&time));
        }
    }
}
