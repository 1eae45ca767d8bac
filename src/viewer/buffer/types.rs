//! Pixel buffer types

use crate::viewer::common::error::{Result, ViewerError};
use crate::viewer::common::geometry::Rect;

/// Channel layout of a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Single intensity channel
    Gray,
    /// Three channels in Blue-Green-Red order
    Bgr,
}

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Bgr => 3,
        }
    }
}

/// Immutable H×W 8-bit image, interleaved `[B, G, R, B, G, R, ...]` when three-channel.
///
/// Buffers are never mutated once built: every operation that changes pixels
/// produces a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw interleaved samples, validating dimensions and length.
    pub fn new(width: usize, height: usize, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ViewerError::InvalidDimensions(width, height));
        }

        let expected = width * height * channels.count();
        if data.len() != expected {
            return Err(ViewerError::InvalidImage(format!(
                "expected {} samples for {}x{}x{}, got {}",
                expected,
                width,
                height,
                channels.count(),
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Buffer where every pixel equals `pixel` (one sample per channel).
    pub fn filled(width: usize, height: usize, channels: Channels, pixel: &[u8]) -> Result<Self> {
        if pixel.len() != channels.count() {
            return Err(ViewerError::InvalidImage(format!(
                "fill pixel has {} samples, layout needs {}",
                pixel.len(),
                channels.count()
            )));
        }
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * channels.count())
            .collect();
        Self::new(width, height, channels, data)
    }

    /// Builds a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, channels: Channels, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> [u8; 3],
    {
        let count = channels.count();
        let mut data = Vec::with_capacity(width * height * count);
        for y in 0..height {
            for x in 0..width {
                let pixel = f(x, y);
                data.extend_from_slice(&pixel[..count]);
            }
        }
        Self::new(width, height, channels, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels.count()
    }

    pub fn is_color(&self) -> bool {
        self.channels == Channels::Bgr
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Samples of the pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let count = self.channel_count();
        let start = (y * self.width + x) * count;
        Some(&self.data[start..start + count])
    }

    /// Checked pixel read reporting [`ViewerError::OutOfBounds`].
    pub fn pixel(&self, x: usize, y: usize) -> Result<&[u8]> {
        self.get(x, y).ok_or(ViewerError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// All samples of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * self.channel_count();
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Copies the region covered by `rect` (clamped to the image) into a new buffer.
    pub fn crop(&self, rect: &Rect) -> Result<PixelBuffer> {
        let rect = rect.clamp_to(self.width, self.height);
        if rect.is_degenerate() {
            return Err(ViewerError::DegenerateRegion {
                x0: rect.x0 as i64,
                y0: rect.y0 as i64,
                x1: rect.x1 as i64,
                y1: rect.y1 as i64,
            });
        }

        let count = self.channel_count();
        let mut data = Vec::with_capacity(rect.area() * count);
        for y in rect.y0..rect.y1 {
            let row = self.row(y);
            data.extend_from_slice(&row[rect.x0 * count..rect.x1 * count]);
        }
        PixelBuffer::new(rect.width(), rect.height(), self.channels, data)
    }

    /// Samples of an owned buffer, for in-crate painters working on a copy.
    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// New buffer with every sample passed through `f`.
    pub fn map_samples<F>(&self, f: F) -> PixelBuffer
    where
        F: Fn(u8) -> u8,
    {
        PixelBuffer {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let result = PixelBuffer::new(0, 10, Channels::Gray, Vec::new());
        assert!(matches!(result, Err(ViewerError::InvalidDimensions(0, 10))));
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = PixelBuffer::new(4, 4, Channels::Bgr, vec![0u8; 16]);
        assert!(matches!(result, Err(ViewerError::InvalidImage(_))));
    }

    #[test]
    fn test_get_reads_bgr_pixel() {
        let buffer = PixelBuffer::from_fn(3, 2, Channels::Bgr, |x, y| {
            [x as u8, y as u8, 200]
        })
        .unwrap();

        assert_eq!(buffer.get(2, 1), Some(&[2u8, 1, 200][..]));
        assert_eq!(buffer.get(3, 0), None);
        assert!(matches!(buffer.pixel(0, 2), Err(ViewerError::OutOfBounds { .. })));
    }

    #[test]
    fn test_crop_copies_region() {
        let buffer = PixelBuffer::from_fn(10, 8, Channels::Gray, |x, y| {
            [(y * 10 + x) as u8, 0, 0]
        })
        .unwrap();
        let rect = Rect { x0: 2, y0: 3, x1: 5, y1: 6 };

        let cropped = buffer.crop(&rect).unwrap();

        assert_eq!(cropped.width(), 3);
        assert_eq!(cropped.height(), 3);
        assert_eq!(cropped.get(0, 0), Some(&[32u8][..]));
        assert_eq!(cropped.get(2, 2), Some(&[54u8][..]));
        // source untouched
        assert_eq!(buffer.get(0, 0), Some(&[0u8][..]));
    }

    #[test]
    fn test_crop_clamps_and_rejects_empty() {
        let buffer = PixelBuffer::filled(10, 10, Channels::Gray, &[7]).unwrap();

        let clamped = buffer.crop(&Rect { x0: 5, y0: 5, x1: 50, y1: 50 }).unwrap();
        assert_eq!((clamped.width(), clamped.height()), (5, 5));

        let empty = buffer.crop(&Rect { x0: 12, y0: 0, x1: 20, y1: 4 });
        assert!(matches!(empty, Err(ViewerError::DegenerateRegion { .. })));
    }
}
