use crate::viewer::buffer::PixelBuffer;
use crate::viewer::common::error::Result;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<PixelBuffer>;
}
