use std::io::Write;

use crate::viewer::buffer::PixelBuffer;
use crate::viewer::common::error::Result;
use crate::viewer::config::TiffCompression;

pub trait ImageWriter {
    fn write_image(&self, image: &PixelBuffer, output: &mut dyn Write, compression: TiffCompression) -> Result<()>;
}
