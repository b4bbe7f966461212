//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over shared primitives. Each node splits its objects at the
//! median along an axis picked at random, so trees are cheap to build and the
//! shape is reproducible from the build rng's seed.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::{Aabb, HitRecord, Hittable, Interval, Ray};

/// BVH node with two children.
///
/// A node over a single object points both children at it.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
    depth: usize,
    len: usize,
}

impl BvhNode {
    /// Build a BVH over `objects` for the shutter interval `[time0, time1]`.
    ///
    /// Returns `None` when there is nothing to enclose.
    pub fn new(
        mut objects: Vec<Arc<dyn Hittable>>,
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> Option<Self> {
        if objects.is_empty() {
            return None;
        }
        Some(Self::build(&mut objects, time0, time1, rng))
    }

    fn build(
        objects: &mut [Arc<dyn Hittable>],
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> Self {
        let axis = rng.gen_range(0..3);
        let key = |object: &Arc<dyn Hittable>| object.bounding_box(time0, time1).axis_min(axis);

        let (left, right, depth): (Arc<dyn Hittable>, Arc<dyn Hittable>, usize) =
            match objects.len() {
                1 => (objects[0].clone(), objects[0].clone(), 1),
                2 => {
                    let (first, second) = (&objects[0], &objects[1]);
                    if key(first) <= key(second) {
                        (first.clone(), second.clone(), 1)
                    } else {
                        (second.clone(), first.clone(), 1)
                    }
                }
                _ => {
                    objects.sort_by(|a, b| key(a).total_cmp(&key(b)));

                    // Split at midpoint
                    let (left_objects, right_objects) = objects.split_at_mut(objects.len() / 2);
                    let left = Self::build(left_objects, time0, time1, rng);
                    let right = Self::build(right_objects, time0, time1, rng);
                    let depth = 1 + left.depth.max(right.depth);

                    (Arc::new(left), Arc::new(right), depth)
                }
            };

        let bbox = Aabb::surrounding(
            &left.bounding_box(time0, time1),
            &right.bounding_box(time0, time1),
        );

        Self {
            left,
            right,
            bbox,
            depth,
            len: objects.len(),
        }
    }

    /// Number of node levels, counting this one.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of primitives enclosed.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let left = self.left.hit(ray, ray_t);

        // Only check right up to closest hit
        let right_t = left.as_ref().map_or(ray_t, |rec| ray_t.with_max(rec.t));
        let right = self.right.hit(ray, right_t);

        right.or(left)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Aabb {
        self.bbox
    }
}
