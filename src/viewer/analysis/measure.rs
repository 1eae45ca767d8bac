//! Distance readout relative to a cross-hair.

use crate::viewer::common::geometry::Point;

/// Horizontal and vertical extent between the cross-hair and the pointer,
/// in native pixels scaled by the pixel pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub width: f64,
    pub height: f64,
}

pub fn measure(cross: Point, pointer: Point, pixel_pitch: f64) -> Measurement {
    Measurement {
        width: cross.x.abs_diff(pointer.x) as f64 * pixel_pitch,
        height: cross.y.abs_diff(pointer.y) as f64 * pixel_pitch,
    }
}
