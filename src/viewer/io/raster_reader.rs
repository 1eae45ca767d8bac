//! General raster reader (PNG, JPEG, BMP, TIFF, ...) backed by the `image` crate.

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::viewer::buffer::{Channels, PixelBuffer};
use crate::viewer::common::error::{Result, ViewerError};
use crate::viewer::io::reader::ImageReader;

/// Reader for any format `image` can guess from the file contents.
///
/// Images with color become BGR, everything else becomes Gray. Alpha is
/// dropped and 16-bit or float samples are scaled down to 8 bits.
pub struct RasterImageReader;

impl ImageReader for RasterImageReader {
    fn read_image(&self, data: &[u8]) -> Result<PixelBuffer> {
        debug!("Decoding raster image, {} bytes", data.len());

        let decoded = image::load_from_memory(data).map_err(|e| ViewerError::DecodeError(e.to_string()))?;
        let (width, height) = decoded.dimensions();
        debug!("Decoded image: {}x{} {:?}", width, height, decoded.color());

        let (channels, samples) = to_samples(decoded);
        PixelBuffer::new(width as usize, height as usize, channels, samples)
    }
}

fn to_samples(decoded: DynamicImage) -> (Channels, Vec<u8>) {
    if decoded.color().has_color() {
        let mut samples = decoded.into_rgb8().into_raw();
        for px in samples.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
        (Channels::Bgr, samples)
    } else {
        (Channels::Gray, decoded.into_luma8().into_raw())
    }
}
