//! Color module
//!
//! This module provides channel projection (gray, single BGR channel, single HSV
//! channel) and the caller-supplied pixel transform strategy.

mod projector;
mod transform;

pub use projector::{
    ChannelMode,
    extract_channel,
    hsv_or_raw,
    hsv_pixel,
    project,
    to_gray,
    to_hsv,
    try_project,
};
pub use transform::{IntensityTransform, PixelTransform};
