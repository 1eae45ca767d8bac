//! Display <-> native coordinate mapping.

use crate::viewer::common::geometry::{Point, Rect};

/// Upper-bound margin, in native pixels, kept between a mapped point and the
/// right/bottom image edge so neighbourhood reads around it stay in bounds.
pub const EDGE_MARGIN: usize = 5;

const ROUNDING_EPSILON: f64 = 1e-9;

/// Scale and crop offset relating one native image to its display buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    /// Native-to-display scale
    pub ratio: f64,
    /// Native coordinates of the display origin (top-left of the crop region)
    pub offset: Point,
    /// Width of the full native image
    pub native_width: usize,
    /// Height of the full native image
    pub native_height: usize,
    pub display_width: usize,
    pub display_height: usize,
}

impl FitTransform {
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.ratio, self.offset, self.native_width, self.native_height)
    }
}

/// Bidirectional display/native transform for one tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    ratio: f64,
    offset: Point,
    native_width: usize,
    native_height: usize,
}

impl CoordinateMapper {
    pub fn new(ratio: f64, offset: Point, native_width: usize, native_height: usize) -> Self {
        Self {
            ratio,
            offset,
            native_width,
            native_height,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Native pixel under display position `(dx, dy)`, offset by the crop origin and
    /// clamped to `[0, native_dim - EDGE_MARGIN]`.
    ///
    /// Rounding deviates from a plain `floor(d / ratio) + offset`. The two agree
    /// whenever `d / ratio` is integral; otherwise the pick is the native pixel that
    /// [`to_display`](Self::to_display) draws at `d` (the first of them when
    /// downscaled, i.e. `ceil(d / ratio)`), so display -> native -> display is exact.
    /// When downscaled this selects one native pixel further right/down than the
    /// floor formula for every display position that falls between two samples.
    pub fn to_native(&self, dx: i64, dy: i64) -> Point {
        Point::new(
            self.axis_to_native(dx, self.offset.x, self.native_width),
            self.axis_to_native(dy, self.offset.y, self.native_height),
        )
    }

    /// Display position of native pixel `(nx, ny)`: `floor((n - offset) * ratio)`.
    ///
    /// Points left of/above the crop offset map to negative display coordinates.
    pub fn to_display(&self, nx: usize, ny: usize) -> (i64, i64) {
        (
            self.axis_to_display(nx, self.offset.x),
            self.axis_to_display(ny, self.offset.y),
        )
    }

    /// Display-space corners of a native rectangle, as `(x0, y0, x1, y1)`.
    pub fn rect_to_display(&self, rect: &Rect) -> (i64, i64, i64, i64) {
        let (x0, y0) = self.to_display(rect.x0, rect.y0);
        let (x1, y1) = self.to_display(rect.x1, rect.y1);
        (x0, y0, x1, y1)
    }

    fn axis_to_native(&self, d: i64, offset: usize, native_dim: usize) -> usize {
        let index = if self.ratio <= 1.0 {
            (d as f64 / self.ratio - ROUNDING_EPSILON).ceil() as i64
        } else {
            // upscaled: the native pixel whose enlarged footprint covers d
            ((d + 1) as f64 / self.ratio - ROUNDING_EPSILON).ceil() as i64 - 1
        };
        let scaled = index + offset as i64;
        let upper = native_dim.saturating_sub(EDGE_MARGIN) as i64;
        scaled.clamp(0, upper) as usize
    }

    fn axis_to_display(&self, n: usize, offset: usize) -> i64 {
        ((n as f64 - offset as f64) * self.ratio + ROUNDING_EPSILON).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(ratio: f64, offset: (usize, usize)) -> CoordinateMapper {
        CoordinateMapper::new(ratio, Point::new(offset.0, offset.1), 1000, 500)
    }

    #[test]
    fn test_to_native_scales_and_offsets() {
        let m = mapper(0.4, (0, 0));
        assert_eq!(m.to_native(100, 50), Point::new(250, 125));

        let m = mapper(2.0, (100, 40));
        assert_eq!(m.to_native(10, 7), Point::new(105, 43));
    }

    #[test]
    fn test_to_native_clamps_with_edge_margin() {
        let m = mapper(0.4, (0, 0));
        assert_eq!(m.to_native(-20, 10_000), Point::new(0, 495));
        assert_eq!(m.to_native(10_000, -1), Point::new(995, 0));
    }

    #[test]
    fn test_edge_margin_saturates_on_tiny_images() {
        let m = CoordinateMapper::new(10.0, Point::default(), 3, 3);
        assert_eq!(m.to_native(25, 25), Point::new(0, 0));
    }

    #[test]
    fn test_to_display_applies_offset() {
        let m = mapper(0.5, (200, 100));
        assert_eq!(m.to_display(300, 150), (50, 25));
        assert_eq!(m.to_display(100, 100), (-50, 0));
    }

    #[test]
    fn test_matches_floor_formula_on_integral_quotients() {
        let m = mapper(0.5, (0, 0));
        assert_eq!(m.to_native(100, 37), Point::new(200, 74));

        let m = mapper(4.0, (0, 0));
        assert_eq!(m.to_native(9, 15), Point::new(2, 3));
    }

    #[test]
    fn test_downscaled_pick_is_drawn_at_the_clicked_pixel() {
        // floor(1 / 0.4) = 2 would be drawn at display 0
        let m = mapper(0.4, (0, 0));
        assert_eq!(m.to_native(1, 1), Point::new(3, 3));
        assert_eq!(m.to_display(3, 3), (1, 1));
    }

    #[test]
    fn test_downscaled_pick_is_at_most_one_past_floor() {
        let m = mapper(0.4, (0, 0));
        let mut shifted = 0;
        for d in 0..390 {
            let floor = (d as f64 / 0.4).floor() as usize;
            let pick = m.to_native(d, 0).x;
            assert!(pick == floor || pick == floor + 1, "display {}", d);
            if pick != floor {
                shifted += 1;
            }
        }
        assert!(shifted > 0);
    }

    #[test]
    fn test_upscaled_pick_is_the_covering_pixel() {
        let m = mapper(5.0, (0, 0));
        for d in 0..5 {
            assert_eq!(m.to_native(d, d), Point::new(0, 0));
        }
        assert_eq!(m.to_native(5, 9), Point::new(1, 1));
    }

    #[test]
    fn test_round_trip_is_exact() {
        for ratio in [0.25, 0.37, 0.4, 0.5, 0.95, 1.0, 1.5, 2.0, 3.3] {
            let m = mapper(ratio, (30, 20));
            for nx in (30..990).step_by(7) {
                for ny in (20..490).step_by(11) {
                    let (dx, dy) = m.to_display(nx, ny);
                    let back = m.to_native(dx, dy);
                    assert_eq!(m.to_display(back.x, back.y), (dx, dy), "ratio {}", ratio);
                }
            }
        }
    }

    #[test]
    fn test_fit_transform_builds_mapper() {
        let transform = FitTransform {
            ratio: 0.5,
            offset: Point::new(4, 6),
            native_width: 100,
            native_height: 80,
            display_width: 48,
            display_height: 37,
        };
        assert_eq!(transform.mapper().to_native(10, 10), Point::new(24, 26));
    }
}
