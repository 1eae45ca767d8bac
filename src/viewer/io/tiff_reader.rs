//! TIFF image reader producing 8-bit Gray or BGR buffers.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::viewer::buffer::{Channels, PixelBuffer};
use crate::viewer::common::error::{Result, ViewerError};
use crate::viewer::io::reader::ImageReader;

/// Reader for baseline TIFF files.
///
/// Supports 8- and 16-bit Gray, GrayA, RGB and RGBA images. Alpha is dropped,
/// 16-bit samples keep their high byte and RGB is reordered to BGR.
pub struct TiffImageReader;

impl ImageReader for TiffImageReader {
    fn read_image(&self, data: &[u8]) -> Result<PixelBuffer> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(|e| ViewerError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| ViewerError::DecodeError(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| ViewerError::DecodeError(e.to_string()))?;

        let samples: Vec<u8> = match decoder
            .read_image()
            .map_err(|e| ViewerError::DecodeError(e.to_string()))?
        {
            DecodingResult::U8(buf) => buf,
            DecodingResult::U16(buf) => buf.iter().map(|&v| (v >> 8) as u8).collect(),
            _ => {
                return Err(ViewerError::DecodeError(format!(
                    "unsupported sample format for {:?}",
                    color_type
                )));
            }
        };

        debug!("Decoded image: {}x{} {:?}", width, height, color_type);

        let (channels, data) = match color_type {
            ColorType::Gray(_) => (Channels::Gray, samples),
            ColorType::GrayA(_) => (Channels::Gray, samples.chunks_exact(2).map(|px| px[0]).collect()),
            ColorType::RGB(_) => (Channels::Bgr, rgb_to_bgr(&samples, 3)),
            ColorType::RGBA(_) => (Channels::Bgr, rgb_to_bgr(&samples, 4)),
            other => {
                return Err(ViewerError::DecodeError(format!(
                    "unsupported color type {:?}",
                    other
                )));
            }
        };

        PixelBuffer::new(width as usize, height as usize, channels, data)
    }
}

fn rgb_to_bgr(samples: &[u8], stride: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() / stride * 3);
    for px in samples.chunks_exact(stride) {
        out.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    out
}
