//! Render target storage and file I/O.
//!
//! Pixels are stored row-major with row 0 at the **bottom** of the picture, so
//! the vertical image coordinate grows with the camera's up direction. The PPM
//! codec (see [`crate::ppm`]) maps rows to the file's top-first order.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ember_math::Color;
use thiserror::Error;

use crate::ppm;

/// Errors that can occur while reading or writing images.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PPM parse error: {0}")]
    Parse(String),

    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Pixel buffer size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type ImageResult<T> = Result<T, ImageError>;

/// Dense 2D array of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Returns true if the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y). Out-of-range coordinates read as black.
    pub fn get(&self, x: u32, y: u32) -> Color {
        if x >= self.width || y >= self.height {
            return Color::ZERO;
        }
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y). Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// 8-bit RGB bytes in display order (top row first).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&quantize(self.get(x, y)));
            }
        }
        bytes
    }

    /// Save the image. `.png` goes through the `image` crate, every other
    /// extension is written as plain PPM.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let path = path.as_ref();
        if has_extension(path, "png") {
            let rgb = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8())
                .ok_or(ImageError::SizeMismatch {
                    expected: self.width as usize * self.height as usize * 3,
                    actual: self.pixels.len() * 3,
                })?;
            rgb.save(path)?;
        } else {
            let file = File::create(path)?;
            ppm::write_ppm(self, BufWriter::new(file))?;
        }
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Load an image. `.ppm` files use the built-in reader; other formats are
    /// decoded by the `image` crate.
    pub fn load<P: AsRef<Path>>(path: P) -> ImageResult<Self> {
        let path = path.as_ref();
        if has_extension(path, "ppm") {
            let file = File::open(path)?;
            return ppm::read_ppm(BufReader::new(file));
        }

        let decoded = image::open(path)?.into_rgb32f();
        let (width, height) = decoded.dimensions();
        let mut buffer = ImageBuffer::new(width, height);
        for (x, row, pixel) in decoded.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            // image rows run top-down
            buffer.set(x, height - 1 - row, Color::new(r as f64, g as f64, b as f64));
        }
        Ok(buffer)
    }
}

/// Convert one channel in [0, 1] to an 8-bit value, clamping out-of-range and
/// NaN input.
#[inline]
pub fn quantize_channel(c: f64) -> u8 {
    (255.999 * c).clamp(0.0, 255.0) as u8
}

/// Convert a color to 8-bit RGB.
pub fn quantize(color: Color) -> [u8; 3] {
    [
        quantize_channel(color.x),
        quantize_channel(color.y),
        quantize_channel(color.z),
    ]
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
