//! Material trait for surface scattering.

use std::sync::Arc;

use ember_math::sampling::{random_in_unit_cube, random_unit, random_unit_vector};
use ember_math::{normalize_or, reflect, refract};
use rand::RngCore;

use crate::{Color, HitRecord, Point3, Ray, SolidColor, Texture, Vec3};

/// Refractive index of the medium surrounding every object.
const AIR_IOR: f64 = 1.0;

/// Surface state a material needs to scatter a ray.
///
/// Built by the integrator from a [`HitRecord`]; materials never see the
/// geometry that produced it.
#[derive(Debug, Clone, Copy)]
pub struct ScatterContext {
    pub p: Point3,
    /// Normal facing against the incoming ray
    pub normal: Vec3,
    /// Unit direction of the incoming ray
    pub direction: Vec3,
    pub time: f64,
    pub u: f64,
    pub v: f64,
    /// The ray hit the back face of the surface
    pub inside: bool,
    /// Ratio of refractive indices across the surface, set only for
    /// refractive materials
    pub refraction_ratio: Option<f64>,
}

impl ScatterContext {
    pub fn new(p: Point3, normal: Vec3, direction: Vec3, time: f64) -> Self {
        Self {
            p,
            normal,
            direction: normalize_or(direction, -normal),
            time,
            u: 0.0,
            v: 0.0,
            inside: false,
            refraction_ratio: None,
        }
    }

    /// Context for the hit, with the refraction ratio resolved from the
    /// material's index and the primitive's orientation.
    ///
    /// A ray leaves the medium when it hits the back face of a regular
    /// primitive or the front face of an inverted one.
    pub fn from_hit(rec: &HitRecord<'_>) -> Self {
        let refraction_ratio = rec.material.refractive_index().map(|ior| {
            if rec.inside ^ rec.inverted {
                ior / AIR_IOR
            } else {
                AIR_IOR / ior
            }
        });

        Self {
            inside: rec.inside,
            u: rec.u,
            v: rec.v,
            refraction_ratio,
            ..Self::new(rec.p, rec.normal, rec.direction, rec.time)
        }
    }
}

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray, or `None` if it is absorbed.
    fn scatter(&self, ctx: &ScatterContext, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Light emitted at the given surface coordinates. Black for most
    /// materials.
    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::ZERO
    }

    /// Index of refraction for materials that transmit light.
    fn refractive_index(&self) -> Option<f64> {
        None
    }
}

/// Direction of a diffuse bounce: the normal perturbed by `offset`.
///
/// Falls back to the normal when the two cancel out.
pub fn diffuse_direction(normal: Vec3, offset: Vec3) -> Vec3 {
    normalize_or(normal + offset, normal)
}

/// Schlick's approximation for reflectance
pub fn schlick(cosine: f64, refraction_ratio: f64) -> f64 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Lambertian {
    fn scatter(&self, ctx: &ScatterContext, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let direction = diffuse_direction(ctx.normal, random_unit_vector(rng));

        Some(ScatterResult {
            attenuation: self.albedo.value(ctx.u, ctx.v, ctx.p),
            scattered: Ray::new(ctx.p, direction, ctx.time),
        })
    }
}

/// Metal (specular) material.
#[derive(Clone)]
pub struct Metal {
    albedo: Arc<dyn Texture>,
    fuzz: f64,
}

impl Metal {
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Arc<dyn Texture>, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn from_color(albedo: Color, fuzz: f64) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)), fuzz)
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ctx: &ScatterContext, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ctx.direction, ctx.normal);
        let direction = normalize_or(reflected + self.fuzz * random_in_unit_cube(rng), reflected);

        // Fuzzed directions pointing into the surface are absorbed
        if direction.dot(ctx.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo.value(ctx.u, ctx.v, ctx.p),
            scattered: Ray::new(ctx.p, direction, ctx.time),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f64,
    tint: Arc<dyn Texture>,
}

impl Dielectric {
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f64) -> Self {
        Self::with_tint(ior, Arc::new(SolidColor::new(Color::ONE)))
    }

    pub fn with_tint(ior: f64, tint: Arc<dyn Texture>) -> Self {
        Self { ior, tint }
    }
}

impl Material for Dielectric {
    fn scatter(&self, ctx: &ScatterContext, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let ratio = ctx.refraction_ratio.unwrap_or(if ctx.inside {
            self.ior / AIR_IOR
        } else {
            AIR_IOR / self.ior
        });

        let cos_theta = (-ctx.direction).dot(ctx.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        let cannot_refract = ratio * sin_theta > 1.0;
        let direction = if cannot_refract || schlick(cos_theta, ratio) > random_unit(rng) {
            reflect(ctx.direction, ctx.normal)
        } else {
            normalize_or(refract(ctx.direction, ctx.normal, ratio), ctx.direction)
        };

        Some(ScatterResult {
            attenuation: self.tint.value(ctx.u, ctx.v, ctx.p),
            scattered: Ray::new(ctx.p, direction, ctx.time),
        })
    }

    fn refractive_index(&self) -> Option<f64> {
        Some(self.ior)
    }
}

/// Diffuse light emitter.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }

    pub fn from_color(emit: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(emit)))
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ctx: &ScatterContext, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, u: f64, v: f64, p: Point3) -> Color {
        self.emit.value(u, v, p)
    }
}
