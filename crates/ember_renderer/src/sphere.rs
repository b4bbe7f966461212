//! Sphere primitive for ray tracing.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::{Aabb, HitRecord, Hittable, Interval, Material, Point3, Ray, Vec3};

/// A sphere primitive.
///
/// A negative radius describes the same surface turned inside out, which
/// lets a glass sphere carry a hollow bubble.
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_inverted(&self) -> bool {
        self.radius < 0.0
    }
}

/// Get the UV coordinates for a point on the unit sphere.
pub(crate) fn sphere_uv(p: Vec3) -> (f64, f64) {
    let phi = p.z.atan2(p.x);
    let theta = p.y.clamp(-1.0, 1.0).acos();
    ((phi + PI) / (2.0 * PI), theta / PI)
}

/// Nearest root of the ray/sphere quadratic inside `ray_t`.
pub(crate) fn intersect_sphere(
    center: Point3,
    radius: f64,
    ray: &Ray,
    ray_t: Interval,
) -> Option<f64> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let half_b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let near = (-half_b - sqrtd) / a;
    if ray_t.contains(near) {
        return Some(near);
    }
    let far = (-half_b + sqrtd) / a;
    ray_t.contains(far).then_some(far)
}

/// Box around a sphere of `radius` (either sign) at `center`.
pub(crate) fn sphere_box(center: Point3, radius: f64) -> Aabb {
    let rvec = Vec3::splat(radius.abs());
    Aabb::new(center - rvec, center + rvec)
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = intersect_sphere(self.center, self.radius, ray, ray_t)?;
        let outward_normal = (ray.at(t) - self.center) / self.radius.abs();

        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            sphere_uv(outward_normal),
            self.is_inverted(),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Aabb {
        sphere_box(self.center, self.radius)
    }
}
