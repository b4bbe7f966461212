//! Plain-text PPM (`P3`) codec.
//!
//! Layout written:
//!
//! ```text
//! P3
//! <width> <height>
//! 255
//! R G B        <- one line per pixel
//! ```
//!
//! The first pixel line is the top-left of the picture. Since
//! [`ImageBuffer`] keeps the bottom row at index 0, the writer walks buffer
//! rows from `height - 1` down to 0 and the reader fills them in the same
//! order.

use std::io::{BufRead, Write};

use ember_math::Color;

use crate::image_buffer::{quantize, ImageBuffer, ImageError, ImageResult};

/// Write `image` as a P3 PPM.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in (0..image.height).rev() {
        for x in 0..image.width {
            let [r, g, b] = quantize(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}

/// Read a P3 PPM. Tokens may be separated by any whitespace and `#` starts a
/// comment that runs to the end of the line.
pub fn read_ppm<R: BufRead>(reader: R) -> ImageResult<ImageBuffer> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let content = match line.find('#') {
            Some(i) => &line[..i],
            None => &line,
        };
        tokens.extend(content.split_whitespace().map(str::to_owned));
    }
    let mut tokens = tokens.into_iter();

    let magic = tokens
        .next()
        .ok_or_else(|| ImageError::Parse("empty file".to_string()))?;
    if magic != "P3" {
        return Err(ImageError::Parse(format!("unsupported magic number {magic:?}")));
    }

    let mut next_number = |what: &str| -> ImageResult<u32> {
        let token = tokens
            .next()
            .ok_or_else(|| ImageError::Parse(format!("unexpected end of file reading {what}")))?;
        token
            .parse::<u32>()
            .map_err(|_| ImageError::Parse(format!("invalid {what}: {token:?}")))
    };

    let width = next_number("width")?;
    let height = next_number("height")?;
    let max_value = next_number("max value")?;
    if max_value == 0 {
        return Err(ImageError::Parse("max value must be positive".to_string()));
    }
    let scale = 1.0 / max_value as f64;

    let mut image = ImageBuffer::new(width, height);
    for y in (0..height).rev() {
        for x in 0..width {
            let r = next_number("red channel")?;
            let g = next_number("green channel")?;
            let b = next_number("blue channel")?;
            image.set(
                x,
                y,
                Color::new(r as f64 * scale, g as f64 * scale, b as f64 * scale),
            );
        }
    }

    Ok(image)
}
