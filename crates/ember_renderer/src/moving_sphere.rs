//! Sphere whose centre moves linearly across the shutter interval.

use std::sync::Arc;

use crate::sphere::{intersect_sphere, sphere_box, sphere_uv};
use crate::{Aabb, HitRecord, Hittable, Interval, Material, Point3, Ray};

/// Shutter spans shorter than this keep the sphere at its start position.
const MIN_TIME_SPAN: f64 = 5e-5;

pub struct MovingSphere {
    center0: Point3,
    center1: Point3,
    time0: f64,
    time1: f64,
    radius: f64,
    material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(
        (center0, center1): (Point3, Point3),
        (time0, time1): (f64, f64),
        radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    /// Centre at `time`, linearly interpolated (and extrapolated) between the
    /// two keyed positions.
    pub fn center(&self, time: f64) -> Point3 {
        let span = self.time1 - self.time0;
        if span.abs() < MIN_TIME_SPAN {
            return self.center0;
        }
        self.center0 + ((time - self.time0) / span) * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let center = self.center(ray.time);
        let t = intersect_sphere(center, self.radius, ray, ray_t)?;
        let outward_normal = (ray.at(t) - center) / self.radius.abs();

        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            sphere_uv(outward_normal),
            self.radius < 0.0,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb {
        Aabb::surrounding(
            &sphere_box(self.center(time0), self.radius),
            &sphere_box(self.center(time1), self.radius),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Vec3, HIT_EPSILON};

    fn moving(time1: f64) -> MovingSphere {
        MovingSphere::new(
            (Point3::ZERO, Point3::new(0.0, 2.0, 0.0)),
            (0.0, time1),
            0.5,
            Arc::new(Lambertian::from_color(Color::ONE)),
        )
    }

    #[test]
    fn test_center_interpolation() {
        let sphere = moving(1.0);
        assert_eq!(sphere.center(0.0), Point3::ZERO);
        assert_eq!(sphere.center(0.5), Point3::new(0.0, 1.0, 0.0));
        assert_eq!(sphere.center(1.0), Point3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_degenerate_shutter_stays_put() {
        let sphere = moving(1e-6);
        assert_eq!(sphere.center(0.75), Point3::ZERO);
        assert!(sphere.center(0.75).is_finite());
    }

    #[test]
    fn test_hit_depends_on_ray_time() {
        let sphere = moving(1.0);
        let interval = Interval::new(HIT_EPSILON, f64::INFINITY);

        let early = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vec3::Z, 0.0);
        let rec = sphere.hit(&early, interval).unwrap();
        assert!((rec.t - 4.5).abs() < 1e-12);
        assert_eq!(rec.time, 0.0);

        let late = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vec3::Z, 1.0);
        assert!(sphere.hit(&late, interval).is_none());

        let late_high = Ray::new(Point3::new(0.0, 2.0, 5.0), -Vec3::Z, 1.0);
        assert!(sphere.hit(&late_high, interval).is_some());
    }

    #[test]
    fn test_bounding_box_covers_motion() {
        let bbox = moving(1.0).bounding_box(0.0, 1.0);
        assert_eq!(bbox.min(), Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(bbox.max(), Point3::new(0.5, 2.5, 0.5));
    }
}
