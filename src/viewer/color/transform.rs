//! Caller-supplied pixel transforms applied before channel projection.

use crate::viewer::buffer::PixelBuffer;
use crate::viewer::common::error::Result;

/// A buffer-to-buffer processing step registered on a session.
pub trait PixelTransform {
    fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer>;
}

impl<F> PixelTransform for F
where
    F: Fn(&PixelBuffer) -> Result<PixelBuffer>,
{
    fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        self(buffer)
    }
}

/// Linear intensity adjustment `clip(coeff * v + offset, 0, 255)` on every sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityTransform {
    pub coeff: f64,
    pub offset: f64,
}

impl IntensityTransform {
    pub fn new(coeff: f64, offset: f64) -> Self {
        Self { coeff, offset }
    }

    /// Contrast boost used as the stock processing step.
    pub fn boost() -> Self {
        Self::new(1.3, 0.0)
    }
}

impl Default for IntensityTransform {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl PixelTransform for IntensityTransform {
    fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        let (coeff, offset) = (self.coeff, self.offset);
        Ok(buffer.map_samples(|v| (coeff * v as f64 + offset).clamp(0.0, 255.0) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::buffer::Channels;

    #[test]
    fn test_intensity_scales_and_clips() {
        let buffer = PixelBuffer::new(3, 1, Channels::Gray, vec![10, 100, 250]).unwrap();

        let out = IntensityTransform::boost().apply(&buffer).unwrap();

        assert_eq!(out.data(), &[13, 130, 255]);
        assert_eq!(buffer.data(), &[10, 100, 250]);
    }

    #[test]
    fn test_negative_offset_clips_at_zero() {
        let buffer = PixelBuffer::new(2, 1, Channels::Gray, vec![5, 200]).unwrap();

        let out = IntensityTransform::new(1.0, -50.0).apply(&buffer).unwrap();

        assert_eq!(out.data(), &[0, 150]);
    }

    #[test]
    fn test_closure_as_transform() {
        let invert = |b: &PixelBuffer| -> Result<PixelBuffer> { Ok(b.map_samples(|v| 255 - v)) };
        let buffer = PixelBuffer::new(2, 1, Channels::Gray, vec![0, 55]).unwrap();

        assert_eq!(invert.apply(&buffer).unwrap().data(), &[255, 200]);
    }
}
