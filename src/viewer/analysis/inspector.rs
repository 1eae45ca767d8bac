//! Point value and HSV lookups.

use std::fmt;

use tracing::debug;

use crate::viewer::buffer::PixelBuffer;
use crate::viewer::color::hsv_pixel;

/// Samples of one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelValue {
    Gray(u8),
    /// Blue, green, red
    Bgr([u8; 3]),
}

impl fmt::Display for PixelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelValue::Gray(v) => write!(f, "{}", v),
            PixelValue::Bgr([b, g, r]) => write!(f, "[{} {} {}]", b, g, r),
        }
    }
}

/// HSV of one pixel, or `Empty` when the buffer has no color to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsvReading {
    /// Hue (0-179), saturation, value
    Hsv([u8; 3]),
    Empty,
}

impl fmt::Display for HsvReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HsvReading::Hsv([h, s, v]) => write!(f, "[{} {} {}]", h, s, v),
            HsvReading::Empty => Ok(()),
        }
    }
}

/// Reads the pixel at `(x, y)`; coordinates past the edge are clamped to the last pixel.
pub fn value_at(buffer: &PixelBuffer, x: usize, y: usize) -> PixelValue {
    let (x, y) = clamp_into(buffer, x, y);
    let px = buffer.row(y);
    let count = buffer.channel_count();
    let px = &px[x * count..(x + 1) * count];

    match px {
        [b, g, r] => PixelValue::Bgr([*b, *g, *r]),
        [v, ..] => PixelValue::Gray(*v),
        [] => PixelValue::Gray(0),
    }
}

/// HSV of the pixel at `(x, y)`; `Empty` for single-channel buffers.
pub fn hsv_at(buffer: &PixelBuffer, x: usize, y: usize) -> HsvReading {
    match value_at(buffer, x, y) {
        PixelValue::Bgr([b, g, r]) => HsvReading::Hsv(hsv_pixel(b, g, r)),
        PixelValue::Gray(_) => {
            debug!("HSV lookup on a single-channel buffer");
            HsvReading::Empty
        }
    }
}

fn clamp_into(buffer: &PixelBuffer, x: usize, y: usize) -> (usize, usize) {
    (x.min(buffer.width() - 1), y.min(buffer.height() - 1))
}
