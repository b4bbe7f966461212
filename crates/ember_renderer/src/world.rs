//! Renderable world: camera, objects and the hierarchy rays are cast into.

use std::sync::Arc;

use ember_core::{CameraDesc, MaterialDesc, ObjectDesc, RectAxis, SceneDescription, TextureDesc};
use rand::RngCore;

use crate::{
    Axis, AxisRect, Background, BvhNode, Camera, CheckerTexture, Dielectric, DiffuseLight,
    HitRecord, Hittable, HittableList, ImageBuffer, ImageTexture, Interval, Lambertian, Material,
    Metal, MovingSphere, NoiseTexture, Perlin, Ray, SolidColor, Sphere, Texture,
};

/// Everything a render needs, built once and shared read-only by the
/// render workers.
pub struct World {
    camera: Camera,
    objects: Arc<HittableList>,
    // Shares `objects` when there is no BVH
    root: Arc<dyn Hittable>,
    use_bvh: bool,
    background: Background,
}

impl World {
    /// Assemble a world. The camera is initialized here, and when `use_bvh`
    /// is set a BVH over `objects` becomes the root rays are cast into.
    pub fn new(
        mut camera: Camera,
        objects: HittableList,
        use_bvh: bool,
        background: Background,
        rng: &mut dyn RngCore,
    ) -> Self {
        camera.initialize();
        let (time0, time1) = camera.shutter();

        let bvh = if use_bvh {
            BvhNode::new(objects.objects().to_vec(), time0, time1, rng)
        } else {
            None
        };

        let objects = Arc::new(objects);
        let root: Arc<dyn Hittable> = match bvh {
            Some(bvh) => {
                log::info!(
                    "Built BVH over {} objects (depth {})",
                    bvh.len(),
                    bvh.depth()
                );
                Arc::new(bvh)
            }
            None => objects.clone(),
        };

        Self {
            camera,
            objects,
            root,
            use_bvh,
            background,
        }
    }

    /// Build live objects from a scene description.
    ///
    /// Rng draws (Perlin tables, BVH split axes) come from `rng`, so the same
    /// seed always yields the same world.
    pub fn from_description(
        desc: &SceneDescription,
        aspect_ratio: f64,
        rng: &mut dyn RngCore,
    ) -> Self {
        let camera = build_camera(&desc.camera.clone().unwrap_or_default(), aspect_ratio);

        let mut textures: Vec<Arc<dyn Texture>> = Vec::with_capacity(desc.textures.len());
        for texture in &desc.textures {
            let built = build_texture(texture, &textures, rng);
            textures.push(built);
        }

        let materials: Vec<Arc<dyn Material>> = desc
            .materials
            .iter()
            .map(|material| build_material(material, &textures))
            .collect();

        let mut objects = HittableList::new();
        for object in &desc.objects {
            match build_object(object, &materials) {
                Some(built) => objects.add(built),
                None => log::warn!("Object references a missing material, skipped"),
            }
        }

        let background = desc.background.map_or(Background::Sky, Background::Solid);
        log::info!(
            "World has {} objects, {} materials, {} textures",
            objects.len(),
            materials.len(),
            textures.len()
        );

        Self::new(camera, objects, desc.use_bvh, background, rng)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Hierarchy rays are intersected against: the BVH when enabled, the flat
    /// object list otherwise.
    pub fn root(&self) -> &dyn Hittable {
        self.root.as_ref()
    }

    pub fn objects(&self) -> &HittableList {
        &self.objects
    }

    pub fn uses_bvh(&self) -> bool {
        self.use_bvh
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.root.hit(ray, ray_t)
    }
}

fn build_camera(desc: &CameraDesc, aspect_ratio: f64) -> Camera {
    Camera::new()
        .with_position(desc.look_from, desc.look_at, desc.vup)
        .with_lens(desc.vfov, desc.lens_radius, desc.focus_dist)
        .with_shutter(desc.time0, desc.time1)
        .with_aspect_ratio(aspect_ratio)
}

fn lookup<T: ?Sized>(table: &[Arc<T>], index: usize) -> Option<Arc<T>> {
    table.get(index).cloned()
}

fn texture_or_missing(textures: &[Arc<dyn Texture>], index: usize) -> Arc<dyn Texture> {
    lookup(textures, index).unwrap_or_else(|| {
        log::warn!("Texture {} does not exist, using placeholder", index + 1);
        Arc::new(ImageTexture::empty())
    })
}

fn build_texture(
    desc: &TextureDesc,
    textures: &[Arc<dyn Texture>],
    rng: &mut dyn RngCore,
) -> Arc<dyn Texture> {
    match desc {
        TextureDesc::Solid(color) => Arc::new(SolidColor::new(*color)),
        TextureDesc::Checker { even, odd } => Arc::new(CheckerTexture::new(
            texture_or_missing(textures, *even),
            texture_or_missing(textures, *odd),
        )),
        TextureDesc::Noise { scale, color } => {
            Arc::new(NoiseTexture::new(Perlin::new(rng), *scale, *color))
        }
        TextureDesc::Image { path } => match ImageBuffer::load(path) {
            Ok(image) => {
                log::info!("Loaded image texture {} ({}x{})", path, image.width, image.height);
                Arc::new(ImageTexture::new(image))
            }
            Err(e) => {
                log::warn!("Could not load image texture {}: {}", path, e);
                Arc::new(ImageTexture::empty())
            }
        },
    }
}

fn build_material(desc: &MaterialDesc, textures: &[Arc<dyn Texture>]) -> Arc<dyn Material> {
    match desc {
        MaterialDesc::Lambertian(color) => Arc::new(Lambertian::from_color(*color)),
        MaterialDesc::LambertianTexture(index) => {
            Arc::new(Lambertian::new(texture_or_missing(textures, *index)))
        }
        MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::from_color(*albedo, *fuzz)),
        MaterialDesc::Dielectric { ior } => Arc::new(Dielectric::new(*ior)),
        MaterialDesc::DiffuseLight(color) => Arc::new(DiffuseLight::from_color(*color)),
        MaterialDesc::DiffuseLightTexture(index) => {
            Arc::new(DiffuseLight::new(texture_or_missing(textures, *index)))
        }
    }
}

fn build_object(desc: &ObjectDesc, materials: &[Arc<dyn Material>]) -> Option<Arc<dyn Hittable>> {
    let object: Arc<dyn Hittable> = match desc {
        ObjectDesc::Sphere {
            center,
            radius,
            material,
        } => Arc::new(Sphere::new(*center, *radius, lookup(materials, *material)?)),
        ObjectDesc::MovingSphere {
            center0,
            center1,
            radius,
            time0,
            time1,
            material,
        } => Arc::new(MovingSphere::new(
            (*center0, *center1),
            (*time0, *time1),
            *radius,
            lookup(materials, *material)?,
        )),
        ObjectDesc::Rect {
            axis,
            a,
            b,
            k,
            material,
        } => {
            let axis = match axis {
                RectAxis::X => Axis::X,
                RectAxis::Y => Axis::Y,
                RectAxis::Z => Axis::Z,
            };
            Arc::new(AxisRect::new(axis, *a, *b, *k, lookup(materials, *material)?))
        }
    };
    Some(object)
}
