//! Ember Core - scene description and image I/O.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription` and the camera, texture,
//!   material and object records it is made of. They are renderer-agnostic;
//!   `ember_renderer` turns them into live objects.
//! - **Scene files**: a line-oriented keyword format (`load_scene`).
//! - **Images**: `ImageBuffer` plus a plain-text PPM codec.
//!
//! # Example
//!
//! ```ignore
//! use ember_core::load_scene;
//!
//! let scene = load_scene("scenes/sample.scene")?;
//! println!("Loaded {} materials, {} objects",
//!     scene.materials.len(),
//!     scene.objects.len());
//! ```

pub mod image_buffer;
pub mod loader;
pub mod ppm;
pub mod scene;

pub use ember_math::Color;
pub use image_buffer::{ImageBuffer, ImageError, ImageResult};
pub use loader::{load_scene, parse_scene, SceneError, SceneResult};
pub use scene::{CameraDesc, MaterialDesc, ObjectDesc, RectAxis, SceneDescription, TextureDesc};
