//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use crate::{Aabb, Interval, Material, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Lives only as long as the intersection query that produced it; it borrows
/// the material of the object that was hit.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Point3,
    /// Time of the ray that produced the hit
    pub time: f64,
    /// Surface normal, always facing against the incoming ray
    pub normal: Vec3,
    /// Surface parametrization
    pub u: f64,
    pub v: f64,
    /// Direction of the incoming ray
    pub direction: Vec3,
    /// The ray arrived from inside the object (back face)
    pub inside: bool,
    /// The primitive is inside-out (negative sphere radius)
    pub inverted: bool,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal.
    ///
    /// The stored normal is flipped to face the ray when the ray travels along
    /// the outward normal, and `inside` records that the flip happened.
    pub fn new(
        ray: &Ray,
        t: f64,
        outward_normal: Vec3,
        (u, v): (f64, f64),
        inverted: bool,
        material: &'a dyn Material,
    ) -> Self {
        let inside = ray.direction.dot(outward_normal) > 0.0;
        let normal = if inside {
            -outward_normal
        } else {
            outward_normal
        };

        Self {
            t,
            p: ray.at(t),
            time: ray.time,
            normal,
            u,
            v,
            direction: ray.direction,
            inside,
            inverted,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementors are immutable once built and shared between render workers.
pub trait Hittable: Send + Sync {
    /// Nearest intersection of `ray` with this object inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Box enclosing the object for the whole shutter interval
    /// `[time0, time1]`.
    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb;
}

/// A flat list of hittable objects, intersected by linear scan.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }
}

impl From<Vec<Arc<dyn Hittable>>> for HittableList {
    fn from(objects: Vec<Arc<dyn Hittable>>) -> Self {
        Self { objects }
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb {
        self.objects.iter().fold(Aabb::EMPTY, |acc, object| {
            Aabb::surrounding(&acc, &object.bounding_box(time0, time1))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Sphere};

    fn sphere(z: f64) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            Point3::new(0.0, 0.0, z),
            0.5,
            Arc::new(Lambertian::from_color(Color::splat(0.5))),
        ))
    }

    #[test]
    fn test_list_returns_closest() {
        let mut list = HittableList::new();
        list.add(sphere(-5.0));
        list.add(sphere(-2.0));
        list.add(sphere(-8.0));

        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = list.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!((rec.t - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_list_bounding_box() {
        let list = HittableList::from(vec![sphere(-5.0), sphere(-2.0)]);
        let bbox = list.bounding_box(0.0, 1.0);

        assert_eq!(bbox.min(), Point3::new(-0.5, -0.5, -5.5));
        assert_eq!(bbox.max(), Point3::new(0.5, 0.5, -1.5));
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::new();
        let ray = Ray::new_simple(Point3::ZERO, Vec3::Z);
        assert!(list.hit(&ray, Interval::UNIVERSE).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_record_faces_ray() {
        let material = Lambertian::from_color(Color::ONE);
        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let front = HitRecord::new(&ray, 1.0, Vec3::Z, (0.0, 0.0), false, &material);
        assert!(!front.inside);
        assert_eq!(front.normal, Vec3::Z);

        let back = HitRecord::new(&ray, 1.0, -Vec3::Z, (0.0, 0.0), false, &material);
        assert!(back.inside);
        assert_eq!(back.normal, Vec3::Z);
        assert_eq!(back.p, Point3::new(0.0, 0.0, -1.0));
    }
}
