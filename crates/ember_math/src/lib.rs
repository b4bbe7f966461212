//! Ember math types.
//!
//! Double precision vectors come from glam's `DVec3`; this crate names them for
//! the roles they play in the tracer and adds the ray, interval and bounding
//! box types shared by the rest of the workspace.

pub use glam::{dvec3, DVec3};

mod aabb;
mod interval;
mod ray;
pub mod sampling;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Displacement or direction in world space.
pub type Vec3 = DVec3;
/// Position in world space.
pub type Point3 = DVec3;
/// Linear RGB color, one channel per component.
pub type Color = DVec3;

/// Components below this magnitude count as zero.
pub const NEAR_ZERO: f64 = 1e-8;

/// Returns true if every component of `v` is close to zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO && v.y.abs() < NEAR_ZERO && v.z.abs() < NEAR_ZERO
}

/// Normalize `v`, or return `fallback` when `v` has no usable direction.
///
/// Zero-length and non-finite inputs would otherwise produce NaN components
/// that poison every later bounce.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    if near_zero(v) {
        return fallback;
    }
    v.try_normalize().unwrap_or(fallback)
}

/// Mirror `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of the refractive indices on the incoming and
/// outgoing sides.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_normalize_or_zero_vector() {
        let fallback = Vec3::Y;
        assert_eq!(normalize_or(Vec3::ZERO, fallback), fallback);
        assert_eq!(normalize_or(Vec3::splat(1e-12), fallback), fallback);
        assert_eq!(normalize_or(Vec3::splat(f64::NAN), fallback), fallback);

        let n = normalize_or(Vec3::new(3.0, 0.0, 4.0), fallback);
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_matching_media_is_straight() {
        let uv = Vec3::new(1.0, -2.0, 0.5).normalize();
        let refracted = refract(uv, Vec3::Y, 1.0);
        assert!((refracted - uv).length() < 1e-12);
    }
}
