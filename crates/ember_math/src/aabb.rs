use crate::{Interval, Point3, Ray};

/// Axis-Aligned Bounding Box for the BVH.
///
/// Stored as a pair of corners. Construction orders the corners per axis, so
/// `min <= max` holds for every non-empty box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Point3,
    max: Point3,
}

impl Aabb {
    /// Create an AABB from two opposite corners given in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box that contains nothing; the identity of [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        min: Point3::INFINITY,
        max: Point3::NEG_INFINITY,
    };

    #[inline]
    pub fn min(&self) -> Point3 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point3 {
        self.max
    }

    /// Minimum corner coordinate along `axis` (0=X, 1=Y, 2=Z).
    #[inline]
    pub fn axis_min(&self, axis: usize) -> f64 {
        self.min[axis]
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method. A zero direction component yields signed infinities, which
    /// keep axis-parallel rays correct; a NaN bound leaves the running interval
    /// untouched because every comparison with it is false.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        let mut t_in = ray_t.min;
        let mut t_out = ray_t.max;

        for axis in 0..3 {
            let inv_d = 1.0 / r.direction[axis];
            let mut t0 = (self.min[axis] - r.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - r.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_in {
                t_in = t0;
            }
            if t1 < t_out {
                t_out = t1;
            }
            if t_in >= t_out {
                return false;
            }
        }

        true
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::random_range;
    use crate::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_box(rng: &mut StdRng) -> Aabb {
        let a = Point3::new(
            random_range(rng, -10.0, 10.0),
            random_range(rng, -10.0, 10.0),
            random_range(rng, -10.0, 10.0),
        );
        let b = Point3::new(
            random_range(rng, -10.0, 10.0),
            random_range(rng, -10.0, 10.0),
            random_range(rng, -10.0, 10.0),
        );
        Aabb::new(a, b)
    }

    #[test]
    fn test_aabb_orders_corners() {
        let aabb = Aabb::new(Point3::new(10.0, 0.0, 10.0), Point3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min(), Point3::ZERO);
        assert_eq!(aabb.max(), Point3::splat(10.0));
        assert_eq!(aabb.axis_min(1), 0.0);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::new(Point3::splat(-1.0), Point3::splat(1.0));

        // Ray pointing at center
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Point3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Interval ends before the box
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_hit_negative_direction() {
        let aabb = Aabb::new(Point3::splat(-1.0), Point3::splat(1.0));
        let ray = Ray::new(Point3::new(5.0, 5.0, 5.0), Vec3::new(-1.0, -1.0, -1.0), 0.0);
        assert!(aabb.hit(&ray, Interval::new(0.0, f64::INFINITY)));
    }

    #[test]
    fn test_aabb_hit_symmetric_in_corner_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let lo = Point3::new(-1.0, -2.0, -0.5);
        let hi = Point3::new(2.0, 1.0, 0.5);
        let forward = Aabb::new(lo, hi);
        let backward = Aabb::new(hi, lo);

        for _ in 0..500 {
            let origin = Point3::new(
                random_range(&mut rng, -5.0, 5.0),
                random_range(&mut rng, -5.0, 5.0),
                random_range(&mut rng, -5.0, 5.0),
            );
            let target = Point3::new(
                random_range(&mut rng, -2.0, 2.0),
                random_range(&mut rng, -2.0, 2.0),
                random_range(&mut rng, -2.0, 2.0),
            );
            let ray = Ray::new(origin, target - origin, 0.0);
            let interval = Interval::new(0.0, f64::INFINITY);
            assert_eq!(forward.hit(&ray, interval), backward.hit(&ray, interval));
        }
    }

    #[test]
    fn test_aabb_hit_axis_parallel() {
        let aabb = Aabb::new(Point3::splat(-1.0), Point3::splat(1.0));

        // Direction has zero x and y components; division yields infinities
        let inside = Ray::new(Point3::new(0.5, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(aabb.hit(&inside, Interval::new(0.0, f64::INFINITY)));

        let outside = Ray::new(Point3::new(1.5, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(!aabb.hit(&outside, Interval::new(0.0, f64::INFINITY)));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::new(Point3::ZERO, Point3::splat(5.0));
        let box2 = Aabb::new(Point3::splat(3.0), Point3::splat(10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.min(), Point3::ZERO);
        assert_eq!(surrounding.max(), Point3::splat(10.0));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_aabb_surrounding_properties() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let a = random_box(&mut rng);
            let b = random_box(&mut rng);
            let c = random_box(&mut rng);

            let ab = Aabb::surrounding(&a, &b);
            assert!(ab.contains(&a));
            assert!(ab.contains(&b));
            assert_eq!(ab, Aabb::surrounding(&b, &a));
            assert_eq!(
                Aabb::surrounding(&ab, &c),
                Aabb::surrounding(&a, &Aabb::surrounding(&b, &c))
            );
        }
    }
}
