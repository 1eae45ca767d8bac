use tracing::debug;

use crate::viewer::buffer::PixelBuffer;
use crate::viewer::common::error::{Result, ViewerError};

/// Guards `floor` against products like `299.99999999999994` that are exact in theory.
const FLOOR_EPSILON: f64 = 1e-9;

/// Isotropic scale fitting a native image into a display box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Native-to-display scale, identical on both axes
    pub ratio: f64,
    pub display_height: usize,
    pub display_width: usize,
}

/// Computes the ratio that fits a `native_h` x `native_w` image into a
/// `box_h` x `box_w` box while preserving its aspect ratio.
///
/// `display_dim = floor(native_dim * ratio)`, never larger than the box and
/// never smaller than one pixel.
pub fn fit(native_h: usize, native_w: usize, box_h: usize, box_w: usize) -> Result<Fit> {
    if native_h == 0 || native_w == 0 {
        return Err(ViewerError::InvalidDimensions(native_w, native_h));
    }
    if box_h == 0 || box_w == 0 {
        return Err(ViewerError::InvalidDimensions(box_w, box_h));
    }

    let h_ratio = box_h as f64 / native_h as f64;
    let w_ratio = box_w as f64 / native_w as f64;
    let ratio = h_ratio.min(w_ratio);

    let scaled = |native: usize, limit: usize| -> usize {
        ((native as f64 * ratio + FLOOR_EPSILON).floor() as usize).clamp(1, limit)
    };

    Ok(Fit {
        ratio,
        display_height: scaled(native_h, box_h),
        display_width: scaled(native_w, box_w),
    })
}

/// Bilinear resampling to `height` x `width` using half-pixel centres.
pub fn resize(buffer: &PixelBuffer, height: usize, width: usize) -> Result<PixelBuffer> {
    if height == 0 || width == 0 {
        return Err(ViewerError::InvalidDimensions(width, height));
    }
    if height == buffer.height() && width == buffer.width() {
        return Ok(buffer.clone());
    }

    debug!(
        "Resizing {}x{} -> {}x{}",
        buffer.width(),
        buffer.height(),
        width,
        height
    );

    let channels = buffer.channel_count();
    let x_taps = taps(buffer.width(), width);
    let y_taps = taps(buffer.height(), height);
    let src = buffer.data();
    let stride = buffer.width() * channels;

    let mut data = Vec::with_capacity(width * height * channels);
    for &(y0, y1, fy) in &y_taps {
        let row0 = &src[y0 * stride..(y0 + 1) * stride];
        let row1 = &src[y1 * stride..(y1 + 1) * stride];
        for &(x0, x1, fx) in &x_taps {
            for c in 0..channels {
                let top = row0[x0 * channels + c] as f32 * (1.0 - fx)
                    + row0[x1 * channels + c] as f32 * fx;
                let bottom = row1[x0 * channels + c] as f32 * (1.0 - fx)
                    + row1[x1 * channels + c] as f32 * fx;
                let value = top * (1.0 - fy) + bottom * fy;
                data.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    PixelBuffer::new(width, height, buffer.channels(), data)
}

/// Source index pair and blend weight for every destination index along one axis.
fn taps(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f32)> {
    let scale = src_len as f32 / dst_len as f32;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let s = ((d as f32 + 0.5) * scale - 0.5).max(0.0);
            let i0 = (s.floor() as usize).min(last);
            let i1 = (i0 + 1).min(last);
            (i0, i1, s - i0 as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::buffer::Channels;

    #[test]
    fn test_fit_landscape_into_square() {
        let fit = fit(500, 1000, 400, 400).unwrap();

        assert!((fit.ratio - 0.4).abs() < 1e-12);
        assert_eq!((fit.display_height, fit.display_width), (200, 400));
    }

    #[test]
    fn test_fit_upscales_small_images() {
        let fit = fit(10, 20, 100, 100).unwrap();

        assert!((fit.ratio - 5.0).abs() < 1e-12);
        assert_eq!((fit.display_height, fit.display_width), (50, 100));
    }

    #[test]
    fn test_fit_never_exceeds_box() {
        for (nh, nw, bh, bw) in [(700, 300, 299, 301), (3, 7, 1, 1), (1080, 1920, 665, 950)] {
            let fit = fit(nh, nw, bh, bw).unwrap();
            assert!(fit.display_height <= bh);
            assert!(fit.display_width <= bw);
            assert!(fit.display_height >= 1 && fit.display_width >= 1);
        }
    }

    #[test]
    fn test_fit_rejects_zero() {
        assert!(matches!(fit(0, 10, 10, 10), Err(ViewerError::InvalidDimensions(_, _))));
        assert!(matches!(fit(10, 10, 10, 0), Err(ViewerError::InvalidDimensions(_, _))));
    }

    #[test]
    fn test_resize_constant_image_stays_constant() {
        let buffer = PixelBuffer::filled(40, 30, Channels::Bgr, &[10, 128, 250]).unwrap();

        let resized = resize(&buffer, 12, 16).unwrap();

        assert_eq!((resized.width(), resized.height()), (16, 12));
        assert!(resized.data().chunks_exact(3).all(|px| px == [10, 128, 250]));
    }

    #[test]
    fn test_resize_preserves_horizontal_gradient_order() {
        let buffer = PixelBuffer::from_fn(100, 4, Channels::Gray, |x, _| {
            [(x * 2) as u8, 0, 0]
        })
        .unwrap();

        let resized = resize(&buffer, 2, 25).unwrap();
        let row = resized.row(0);

        assert!(row.windows(2).all(|w| w[0] <= w[1]));
        assert!(row[0] < 10);
        assert!(row[24] > 185);
    }
}
