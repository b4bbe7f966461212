//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example load_scene -- scenes/sample.scene

use std::env;

use ember_core::{load_scene, MaterialDesc, ObjectDesc, TextureDesc};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-file>");
        println!("\nExamples:");
        println!("  cargo run --example load_scene -- scenes/sample.scene");
        println!("  cargo run --example load_scene -- scenes/lights.scene");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    let scene = match load_scene(path) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &scene.camera {
        Some(camera) => println!(
            "\nCamera at ({:.2}, {:.2}, {:.2}), vfov {:.1}, shutter [{}, {}]",
            camera.look_from.x,
            camera.look_from.y,
            camera.look_from.z,
            camera.vfov,
            camera.time0,
            camera.time1
        ),
        None => println!("\nNo camera (renderer default)"),
    }
    println!("BVH: {}", scene.use_bvh);
    if let Some(bg) = scene.background {
        println!("Background: ({:.2}, {:.2}, {:.2})", bg.x, bg.y, bg.z);
    }

    println!("\n--- Textures ---");
    for (i, texture) in scene.textures.iter().enumerate() {
        let kind = match texture {
            TextureDesc::Solid(_) => "solid".to_string(),
            TextureDesc::Checker { even, odd } => format!("checker of {} and {}", even + 1, odd + 1),
            TextureDesc::Noise { scale, .. } => format!("noise, scale {}", scale),
            TextureDesc::Image { path } => format!("image {}", path),
        };
        println!("  [{}] {}", i + 1, kind);
    }

    println!("\n--- Materials ---");
    for (i, material) in scene.materials.iter().enumerate() {
        let kind = match material {
            MaterialDesc::Lambertian(_) | MaterialDesc::LambertianTexture(_) => "lambertian",
            MaterialDesc::Metal { .. } => "metal",
            MaterialDesc::Dielectric { .. } => "dielectric",
            MaterialDesc::DiffuseLight(_) | MaterialDesc::DiffuseLightTexture(_) => "light",
        };
        println!("  [{}] {}", i + 1, kind);
    }

    println!("\n--- Objects ---");
    for object in &scene.objects {
        match object {
            ObjectDesc::Sphere {
                center,
                radius,
                material,
            } => println!(
                "  sphere at ({:.2}, {:.2}, {:.2}) r={} mat={}",
                center.x,
                center.y,
                center.z,
                radius,
                material + 1
            ),
            ObjectDesc::MovingSphere {
                center0,
                center1,
                radius,
                material,
                ..
            } => println!(
                "  moving sphere ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2}) r={} mat={}",
                center0.x,
                center0.y,
                center0.z,
                center1.x,
                center1.y,
                center1.z,
                radius,
                material + 1
            ),
            ObjectDesc::Rect {
                axis, k, material, ..
            } => println!("  rect on {:?} plane at {} mat={}", axis, k, material + 1),
        }
    }
}
