//! Pixel buffer module
//!
//! This module provides the immutable 8-bit image buffer every component consumes.

pub mod types;

pub use types::{Channels, PixelBuffer};
