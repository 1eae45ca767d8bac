//! Overlay primitives. Every function paints on a copy and leaves its input untouched.

use tracing::debug;

use crate::viewer::buffer::{Channels, PixelBuffer};

use super::canvas::Canvas;

/// Display height at which the base thickness is used unscaled.
const THICKNESS_REFERENCE_HEIGHT: usize = 500;

/// Overlay color in BGR order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const BLACK: Color = Color::bgr(0, 0, 0);

    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    /// Samples to write into a pixel of the given layout. Single-channel
    /// buffers take the first (blue) component.
    pub fn for_channels(&self, channels: Channels) -> [u8; 3] {
        match channels {
            Channels::Bgr => [self.b, self.g, self.r],
            Channels::Gray => [self.b, 0, 0],
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::bgr(255, 0, 0)
    }
}

/// Stroke width for a rectangle drawn on a buffer `height` pixels tall.
pub fn scaled_thickness(base: usize, height: usize) -> usize {
    (base * height / THICKNESS_REFERENCE_HEIGHT).max(1)
}

/// Full-height vertical and full-width horizontal line crossing at `(x, y)`.
pub fn draw_cross(buffer: &PixelBuffer, x: i64, y: i64, thickness: usize, color: Color) -> PixelBuffer {
    let mut canvas = Canvas::from_buffer(buffer);
    let t = thickness.max(1) as i64;
    let (w, h) = (canvas.width(), canvas.height());

    canvas.vline(x, 0, h - 1, t, color);
    canvas.hline(y, 0, w - 1, t, color);

    debug!(x, y, thickness = t, "Cross drawn");
    canvas.finish()
}

/// Rectangle outline through the given corners, drawn in two passes: a black
/// halo two pixels wider, then `color`. `base` is scaled with the buffer height.
pub fn draw_rectangle(
    buffer: &PixelBuffer,
    x0: i64,
    x1: i64,
    y0: i64,
    y1: i64,
    base: usize,
    color: Color,
) -> PixelBuffer {
    let mut canvas = Canvas::from_buffer(buffer);
    let t = scaled_thickness(base, buffer.height()) as i64;

    for (stroke, stroke_color) in [(t + 2, Color::BLACK), (t, color)] {
        canvas.hline(y0, x0, x1, stroke, stroke_color);
        canvas.hline(y1, x0, x1, stroke, stroke_color);
        canvas.vline(x0, y0, y1, stroke, stroke_color);
        canvas.vline(x1, y0, y1, stroke, stroke_color);
    }

    debug!(x0, y0, x1, y1, thickness = t, "Rectangle drawn");
    canvas.finish()
}
