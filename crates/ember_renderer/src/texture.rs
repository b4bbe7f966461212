//! Textures: colors as a function of surface coordinates and position.

use std::f64::consts::TAU;
use std::sync::Arc;

use crate::{Color, ImageBuffer, Perlin, Point3};

/// Debug color returned by an image texture with no pixels.
const MISSING_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// Trait for textures sampled by materials.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// Constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.color
    }
}

/// Checkerboard in UV space, ten cells per unit along each axis.
#[derive(Clone)]
pub struct CheckerTexture {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Color, odd: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let sines = (10.0 * u * TAU).sin() * (10.0 * v * TAU).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Marble-like stripes along z, perturbed by Perlin turbulence.
#[derive(Clone)]
pub struct NoiseTexture {
    noise: Perlin,
    scale: f64,
    color: Color,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, scale: f64, color: Color) -> Self {
        Self {
            noise,
            scale,
            color,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f64, _v: f64, p: Point3) -> Color {
        let phase = self.scale * p.z + 10.0 * self.noise.turbulence(p);
        self.color * 0.5 * (1.0 + phase.sin())
    }
}

/// Texture backed by an image; `v = 0` samples the bottom row.
#[derive(Clone)]
pub struct ImageTexture {
    image: ImageBuffer,
}

impl ImageTexture {
    pub fn new(image: ImageBuffer) -> Self {
        Self { image }
    }

    /// Texture with no pixels, rendered in the debug color.
    pub fn empty() -> Self {
        Self::new(ImageBuffer::new(0, 0))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        if self.image.is_empty() {
            return MISSING_IMAGE_COLOR;
        }

        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let x = ((u * self.image.width as f64) as u32).min(self.image.width - 1);
        let y = ((v * self.image.height as f64) as u32).min(self.image.height - 1);

        self.image.get(x, y)
    }
}
