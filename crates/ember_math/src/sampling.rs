//! Random sampling helpers for Monte Carlo integration.
//!
//! Every function draws from the generator it is handed. Callers own their
//! generators (one per render task), so nothing here touches shared state.

use crate::{Vec3, NEAR_ZERO};
use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn random_unit(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform f64 in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_unit(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Point uniformly distributed in the cube [-1, 1)^3.
pub fn random_in_unit_cube(rng: &mut dyn RngCore) -> Vec3 {
    random_vec3(rng, -1.0, 1.0)
}

/// Point uniformly distributed inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_cube(rng);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_cube(rng);
        let len_sq = p.length_squared();
        if len_sq > NEAR_ZERO && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Point uniformly distributed inside the unit disk in the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
