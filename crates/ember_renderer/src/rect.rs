//! Axis-aligned rectangles.

use std::sync::Arc;

use ember_math::NEAR_ZERO;

use crate::{Aabb, HitRecord, Hittable, Interval, Material, Point3, Ray, Vec3};

/// Half-thickness given to the flat axis of a rectangle's bounding box.
const RECT_PADDING: f64 = 1e-4;

/// Axis a rectangle is perpendicular to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two in-plane axes, in (a, b) order.
    pub fn plane_indices(self) -> (usize, usize) {
        match self {
            Axis::X => (1, 2),
            Axis::Y => (0, 2),
            Axis::Z => (0, 1),
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Rectangle on the plane `axis = k`, spanning `a` and `b` on the other two
/// axes.
pub struct AxisRect {
    axis: Axis,
    a: (f64, f64),
    b: (f64, f64),
    k: f64,
    material: Arc<dyn Material>,
}

impl AxisRect {
    pub fn new(
        axis: Axis,
        (a0, a1): (f64, f64),
        (b0, b1): (f64, f64),
        k: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            axis,
            a: (a0.min(a1), a0.max(a1)),
            b: (b0.min(b1), b0.max(b1)),
            k,
            material,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn corner(&self, a: f64, b: f64, k: f64) -> Point3 {
        let (ia, ib) = self.axis.plane_indices();
        let mut p = Point3::ZERO;
        p[self.axis.index()] = k;
        p[ia] = a;
        p[ib] = b;
        p
    }
}

impl Hittable for AxisRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let axis = self.axis.index();
        let (ia, ib) = self.axis.plane_indices();

        // Rays parallel to the plane never cross it
        let d = ray.direction[axis];
        if d.abs() < NEAR_ZERO {
            return None;
        }

        let t = (self.k - ray.origin[axis]) / d;
        if !ray_t.contains(t) {
            return None;
        }

        let p = ray.at(t);
        let (a, b) = (p[ia], p[ib]);
        if a < self.a.0 || a > self.a.1 || b < self.b.0 || b > self.b.1 {
            return None;
        }

        let u = (a - self.a.0) / (self.a.1 - self.a.0);
        let v = (b - self.b.0) / (self.b.1 - self.b.0);

        Some(HitRecord::new(
            ray,
            t,
            self.axis.unit(),
            (u, v),
            false,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Aabb {
        Aabb::new(
            self.corner(self.a.0, self.b.0, self.k - RECT_PADDING),
            self.corner(self.a.1, self.b.1, self.k + RECT_PADDING),
        )
    }
}
