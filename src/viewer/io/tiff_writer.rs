use std::io::{Cursor, Write};

use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, colortype};
use tracing::debug;

use crate::viewer::buffer::{Channels, PixelBuffer};
use crate::viewer::common::error::{Result, ViewerError};
use crate::viewer::config::TiffCompression;
use crate::viewer::io::writer::ImageWriter;

/// Writes Gray buffers as Gray8 and BGR buffers as RGB8 TIFF.
pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &PixelBuffer, output: &mut dyn Write, compression: TiffCompression) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();

        let compression = match compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| ViewerError::EncodeError(e.to_string()))?
            .with_compression(compression);

        let (width, height) = (image.width() as u32, image.height() as u32);
        match image.channels() {
            Channels::Gray => encoder.write_image::<colortype::Gray8>(width, height, image.data()),
            Channels::Bgr => {
                let rgb: Vec<u8> = image
                    .data()
                    .chunks_exact(3)
                    .flat_map(|px| [px[2], px[1], px[0]])
                    .collect();
                encoder.write_image::<colortype::RGB8>(width, height, &rgb)
            }
        }
        .map_err(|e| ViewerError::EncodeError(e.to_string()))?;

        output
            .write_all(&buffer)
            .map_err(|e| ViewerError::OutputWriteError(e.to_string()))?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
