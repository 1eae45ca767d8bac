//! Image input/output module
//!
//! This module provides the reader and writer seams the session loads and saves
//! buffers through, a general raster reader, a TIFF reader and writer, and the directory catalog
//! that pages through image files.

mod reader;
mod raster_reader;
mod tiff_reader;
mod writer;
mod tiff_writer;
mod catalog;

pub use reader::ImageReader;
pub use raster_reader::RasterImageReader;
pub use tiff_reader::TiffImageReader;
pub use writer::ImageWriter;
pub use tiff_writer::StandardTiffWriter;
pub use catalog::{ImageCatalog, PageMove, wildcard_regex};
