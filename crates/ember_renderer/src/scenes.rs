//! Built-in scenes, used when no scene file is given.

use ember_core::{CameraDesc, MaterialDesc, ObjectDesc, SceneDescription, TextureDesc};
use ember_math::sampling::{random_range, random_unit};
use rand::RngCore;

use crate::{Color, Point3, Vec3};

/// Three spheres on a large ground sphere: diffuse in the middle, hollow glass
/// on the left and fuzzy metal on the right.
pub fn sample_scene() -> SceneDescription {
    let camera = CameraDesc {
        look_from: Point3::new(-2.0, 0.0, 2.0),
        look_at: Point3::ZERO,
        vfov: 40.0,
        lens_radius: 0.02,
        focus_dist: 4.0,
        ..CameraDesc::default()
    };

    let materials = vec![
        MaterialDesc::Lambertian(Color::new(0.8, 0.8, 0.0)),
        MaterialDesc::Lambertian(Color::new(0.7, 0.3, 0.3)),
        MaterialDesc::Dielectric { ior: 1.5 },
        MaterialDesc::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzz: 0.9,
        },
    ];

    let sphere = |center: Point3, radius: f64, material: usize| ObjectDesc::Sphere {
        center,
        radius,
        material,
    };

    let objects = vec![
        sphere(Point3::new(0.0, -100.5, 0.0), 100.0, 0),
        sphere(Point3::ZERO, 0.5, 1),
        sphere(Point3::new(-1.0, 0.0, 0.0), 0.5, 2),
        sphere(Point3::new(-1.0, 0.0, 0.0), -0.4, 2),
        sphere(Point3::new(1.0, 0.0, 0.0), 0.5, 3),
    ];

    SceneDescription {
        camera: Some(camera),
        materials,
        objects,
        ..SceneDescription::default()
    }
}

/// A checkered ground with three large spheres and a 22x22 grid of small
/// random spheres, most of them moving during the shutter interval.
pub fn random_scene(rng: &mut dyn RngCore) -> SceneDescription {
    let camera = CameraDesc {
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::ZERO,
        vfov: 20.0,
        lens_radius: 0.02,
        focus_dist: 13.3,
        time0: 0.0,
        time1: 1.0,
        ..CameraDesc::default()
    };

    let mut scene = SceneDescription {
        camera: Some(camera),
        use_bvh: true,
        ..SceneDescription::default()
    };

    scene.textures = vec![
        TextureDesc::Solid(Color::ZERO),
        TextureDesc::Solid(Color::ONE),
        TextureDesc::Checker { even: 0, odd: 1 },
        TextureDesc::Solid(Color::new(0.2, 0.3, 0.1)),
        TextureDesc::Solid(Color::new(0.9, 0.9, 0.9)),
        TextureDesc::Checker { even: 3, odd: 4 },
    ];

    let ground = add_material(&mut scene, MaterialDesc::LambertianTexture(2));
    scene.objects.push(ObjectDesc::Sphere {
        center: Point3::new(0.0, -1000.0, 0.0),
        radius: 1000.0,
        material: ground,
    });

    let glass_center = Point3::new(0.0, 1.0, 0.0);
    let checker_center = Point3::new(-4.0, 1.0, 0.0);
    let mirror_center = Point3::new(4.0, 1.0, 0.0);

    let glass = add_material(&mut scene, MaterialDesc::Dielectric { ior: 1.5 });
    let checker = add_material(&mut scene, MaterialDesc::LambertianTexture(5));
    let mirror = add_material(
        &mut scene,
        MaterialDesc::Metal {
            albedo: Color::ONE,
            fuzz: 0.0,
        },
    );

    for (center, radius, material) in [
        (glass_center, 1.0, glass),
        (glass_center, -0.9, glass),
        (checker_center, 1.0, checker),
        (mirror_center, 1.0, mirror),
    ] {
        scene.objects.push(ObjectDesc::Sphere {
            center,
            radius,
            material,
        });
    }

    let clear_of_big_spheres = |p: Point3| {
        [glass_center, checker_center, mirror_center]
            .iter()
            .all(|big| (*big - p).length_squared() > 1.0)
    };

    for i in -11..11 {
        for j in -11..11 {
            let center = Point3::new(
                i as f64 + 0.9 * random_unit(rng),
                0.2,
                j as f64 + 0.9 * random_unit(rng),
            );
            if !clear_of_big_spheres(center) {
                continue;
            }

            let material = random_material(rng);
            let material = add_material(&mut scene, material);

            let motion = random_unit(rng);
            let object = if motion < 0.7 {
                let offset = if motion < 0.35 {
                    Vec3::new(0.0, random_range(rng, 0.0, 0.4), 0.0)
                } else {
                    Vec3::new(0.0, 0.0, random_range(rng, 0.0, 0.4))
                };
                ObjectDesc::MovingSphere {
                    center0: center,
                    center1: center + offset,
                    radius: 0.2,
                    time0: 0.0,
                    time1: 1.0,
                    material,
                }
            } else {
                ObjectDesc::Sphere {
                    center,
                    radius: 0.2,
                    material,
                }
            };
            scene.objects.push(object);
        }
    }

    scene
}

fn random_material(rng: &mut dyn RngCore) -> MaterialDesc {
    let choice = random_unit(rng);
    if choice < 0.8 {
        let albedo = Color::new(random_unit(rng), random_unit(rng), random_unit(rng));
        MaterialDesc::Lambertian(albedo)
    } else if choice < 0.95 {
        let albedo = Color::new(
            random_range(rng, 0.5, 1.0),
            random_range(rng, 0.5, 1.0),
            random_range(rng, 0.5, 1.0),
        );
        let fuzz = if random_unit(rng) > 0.5 {
            0.0
        } else {
            random_range(rng, 0.0, 0.5)
        };
        MaterialDesc::Metal { albedo, fuzz }
    } else {
        MaterialDesc::Dielectric { ior: 1.5 }
    }
}

fn add_material(scene: &mut SceneDescription, material: MaterialDesc) -> usize {
    scene.materials.push(material);
    scene.materials.len() - 1
}
