//! Gradient noise for procedural textures.

use ember_math::sampling::random_unit_vector;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::{Point3, Vec3};

const POINT_COUNT: usize = 256;
const TURBULENCE_DEPTH: u32 = 7;

/// Perlin gradient noise over a 256-entry lattice.
///
/// The gradients and permutation tables are drawn once at construction, so
/// two generators built from identically seeded rngs produce the same field.
#[derive(Clone)]
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT).map(|_| random_unit_vector(rng)).collect();
        let perm_x = Self::generate_perm(rng);
        let perm_y = Self::generate_perm(rng);
        let perm_z = Self::generate_perm(rng);

        Self {
            gradients,
            perm_x,
            perm_y,
            perm_z,
        }
    }

    /// Noise value at `p`, roughly in [-1, 1].
    pub fn noise(&self, p: Point3) -> f64 {
        let floor = p.floor();
        let frac = p - floor;
        let (i, j, k) = (floor.x as i64, floor.y as i64, floor.z as i64);

        let mut corners = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in corners.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    // Saturated casts of huge coordinates must not overflow here
                    let index = self.perm_x[Self::wrap(i.wrapping_add(di as i64))]
                        ^ self.perm_y[Self::wrap(j.wrapping_add(dj as i64))]
                        ^ self.perm_z[Self::wrap(k.wrapping_add(dk as i64))];
                    *corner = self.gradients[index];
                }
            }
        }

        Self::interpolate(&corners, frac)
    }

    /// Sum of `|noise|` over successive octaves of doubling frequency and
    /// halving weight.
    pub fn turbulence(&self, p: Point3) -> f64 {
        self.turbulence_with_depth(p, TURBULENCE_DEPTH)
    }

    pub fn turbulence_with_depth(&self, p: Point3, depth: u32) -> f64 {
        let mut accum = 0.0;
        let mut point = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(point).abs();
            weight *= 0.5;
            point *= 2.0;
        }

        accum.abs()
    }

    fn wrap(i: i64) -> usize {
        (i & (POINT_COUNT as i64 - 1)) as usize
    }

    fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
        perm.shuffle(rng);
        perm
    }

    /// Hermite-smoothed trilinear blend of the eight lattice contributions.
    fn interpolate(corners: &[[[Vec3; 2]; 2]; 2], frac: Vec3) -> f64 {
        let smooth = frac * frac * (3.0 - 2.0 * frac);
        let mut accum = 0.0;

        for (i, plane) in corners.iter().enumerate() {
            for (j, row) in plane.iter().enumerate() {
                for (k, gradient) in row.iter().enumerate() {
                    let (fi, fj, fk) = (i as f64, j as f64, k as f64);
                    let weight = frac - Vec3::new(fi, fj, fk);
                    accum += (fi * smooth.x + (1.0 - fi) * (1.0 - smooth.x))
                        * (fj * smooth.y + (1.0 - fj) * (1.0 - smooth.y))
                        * (fk * smooth.z + (1.0 - fk) * (1.0 - smooth.z))
                        * gradient.dot(weight);
                }
            }
        }

        accum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_same_seed_same_field() {
        let a = Perlin::new(&mut StdRng::seed_from_u64(42));
        let b = Perlin::new(&mut StdRng::seed_from_u64(42));

        for i in 0..50 {
            let p = Point3::new(i as f64 * 0.37, -(i as f64) * 0.11, i as f64 * 1.3);
            assert_eq!(a.noise(p), b.noise(p));
            assert_eq!(a.turbulence(p), b.turbulence(p));
        }
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let perlin = Perlin::new(&mut StdRng::seed_from_u64(4));

        for p in [
            Point3::splat(9.3e18),
            Point3::new(1e300, -1e300, 2e19),
            Point3::new(-9.3e18, 0.5, 1e18),
        ] {
            assert!(perlin.noise(p).is_finite());
            assert!(perlin.turbulence(p).is_finite());
        }
    }

    #[test]
    fn test_noise_vanishes_on_lattice() {
        let perlin = Perlin::new(&mut StdRng::seed_from_u64(1));
        assert_eq!(perlin.noise(Point3::new(3.0, -2.0, 7.0)), 0.0);
    }

    #[test]
    fn test_noise_range_and_turbulence_sign() {
        let perlin = Perlin::new(&mut StdRng::seed_from_u64(9));
        let mut rng = StdRng::seed_from_u64(10);

        for _ in 0..1000 {
            let p = ember_math::sampling::random_vec3(&mut rng, -50.0, 50.0);
            let n = perlin.noise(p);
            assert!(n.is_finite() && n.abs() <= 1.8, "noise out of range: {n}");
            assert!(perlin.turbulence(p) >= 0.0);
        }
    }

    #[test]
    fn test_noise_is_continuous() {
        let perlin = Perlin::new(&mut StdRng::seed_from_u64(2));
        let p = Point3::new(1.25, 0.5, -3.75);
        let q = p + Vec3::splat(1e-7);
        assert!((perlin.noise(p) - perlin.noise(q)).abs() < 1e-5);
    }
}
