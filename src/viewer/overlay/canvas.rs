use crate::viewer::buffer::PixelBuffer;

use super::draw::Color;

/// Working copy of a buffer that overlay primitives paint into.
///
/// Coordinates are signed so shapes may extend past the edges; everything
/// outside the buffer is dropped.
pub(super) struct Canvas {
    buffer: PixelBuffer,
}

impl Canvas {
    pub(super) fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            buffer: buffer.clone(),
        }
    }

    pub(super) fn width(&self) -> i64 {
        self.buffer.width() as i64
    }

    pub(super) fn height(&self) -> i64 {
        self.buffer.height() as i64
    }

    /// Paints the half-open box `[x0, x1) x [y0, y1)`.
    pub(super) fn fill(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let x0 = x0.clamp(0, self.width()) as usize;
        let x1 = x1.clamp(0, self.width()) as usize;
        let y0 = y0.clamp(0, self.height()) as usize;
        let y1 = y1.clamp(0, self.height()) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let width = self.buffer.width();
        let count = self.buffer.channel_count();
        let sample = color.for_channels(self.buffer.channels());
        let data = self.buffer.samples_mut();
        for y in y0..y1 {
            let start = (y * width + x0) * count;
            let end = (y * width + x1) * count;
            for px in data[start..end].chunks_exact_mut(count) {
                px.copy_from_slice(&sample[..count]);
            }
        }
    }

    /// Horizontal stroke `thickness` pixels tall centred on row `y`, covering
    /// columns `from..=to` plus the stroke's own half width at each end.
    pub(super) fn hline(&mut self, y: i64, from: i64, to: i64, thickness: i64, color: Color) {
        let (lo, hi) = stroke(y, thickness);
        let (start, _) = stroke(from.min(to), thickness);
        let (_, end) = stroke(from.max(to), thickness);
        self.fill(start, lo, end, hi, color);
    }

    pub(super) fn vline(&mut self, x: i64, from: i64, to: i64, thickness: i64, color: Color) {
        let (lo, hi) = stroke(x, thickness);
        let (start, _) = stroke(from.min(to), thickness);
        let (_, end) = stroke(from.max(to), thickness);
        self.fill(lo, start, hi, end, color);
    }

    pub(super) fn finish(self) -> PixelBuffer {
        self.buffer
    }
}

/// Half-open span of a stroke of `thickness` centred on `center`.
fn stroke(center: i64, thickness: i64) -> (i64, i64) {
    let thickness = thickness.max(1);
    let lo = center - thickness / 2;
    (lo, lo + thickness)
}
