//! Renderer-agnostic scene description.
//!
//! These records mirror what a scene file can express. Textures and materials
//! live in tables and are referenced by zero-based index; the loader has
//! already validated every index against the table it points into.

use ember_math::{Color, Point3, Vec3};

/// Camera placement and lens settings.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraDesc {
    pub look_from: Point3,
    pub vup: Vec3,
    pub look_at: Point3,
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub lens_radius: f64,
    pub focus_dist: f64,
    /// Shutter open time
    pub time0: f64,
    /// Shutter close time
    pub time1: f64,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            look_from: Point3::new(0.0, 0.0, 1.0),
            vup: Vec3::Y,
            look_at: Point3::ZERO,
            vfov: 90.0,
            lens_radius: 0.0,
            focus_dist: 1.0,
            time0: 0.0,
            time1: 1.0,
        }
    }
}

/// A texture definition.
#[derive(Clone, Debug, PartialEq)]
pub enum TextureDesc {
    Solid(Color),
    /// Indices of the even and odd textures
    Checker { even: usize, odd: usize },
    Noise { scale: f64, color: Color },
    Image { path: String },
}

/// A material definition. Textured variants reference the texture table.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialDesc {
    Lambertian(Color),
    LambertianTexture(usize),
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { ior: f64 },
    DiffuseLight(Color),
    DiffuseLightTexture(usize),
}

/// Which axis an axis-aligned rectangle is perpendicular to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectAxis {
    /// `XYRect`: plane z = k
    Z,
    /// `XZRect`: plane y = k
    Y,
    /// `YZRect`: plane x = k
    X,
}

/// A geometric primitive. `material` indexes the material table.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectDesc {
    Sphere {
        center: Point3,
        radius: f64,
        material: usize,
    },
    MovingSphere {
        center0: Point3,
        center1: Point3,
        radius: f64,
        time0: f64,
        time1: f64,
        material: usize,
    },
    Rect {
        axis: RectAxis,
        a: (f64, f64),
        b: (f64, f64),
        k: f64,
        material: usize,
    },
}

/// Everything needed to build a renderable world.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDescription {
    /// Camera; `None` means the renderer picks its default camera
    pub camera: Option<CameraDesc>,
    pub textures: Vec<TextureDesc>,
    pub materials: Vec<MaterialDesc>,
    pub objects: Vec<ObjectDesc>,
    /// Build a BVH over the objects
    pub use_bvh: bool,
    /// Solid background; `None` keeps the sky gradient
    pub background: Option<Color>,
}

impl SceneDescription {
    /// Returns true if the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
