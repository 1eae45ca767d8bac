//! Points and rectangles in native-image pixel coordinates

/// A pixel position in native-image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Point {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with exclusive upper corner: covers `x0..x1` × `y0..y1`.
///
/// Rectangles built through [`Rect::from_corners`] are always normalized
/// (`x0 <= x1`, `y0 <= y1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Rect {
    /// Builds a normalized rectangle from two corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Clamps the rectangle into `[0, width] x [0, height]`.
    pub fn clamp_to(&self, width: usize, height: usize) -> Self {
        Self {
            x0: self.x0.min(width),
            y0: self.y0.min(height),
            x1: self.x1.min(width),
            y1: self.y1.min(height),
        }
    }

    /// Normalizes and clamps two signed corners into `[0, width] x [0, height]`.
    pub fn clamped_from_signed(
        (ax, ay): (i64, i64),
        (bx, by): (i64, i64),
        width: usize,
        height: usize,
    ) -> Self {
        let clamp = |v: i64, max: usize| v.clamp(0, max as i64) as usize;
        Self {
            x0: clamp(ax.min(bx), width),
            y0: clamp(ay.min(by), height),
            x1: clamp(ax.max(bx), width),
            y1: clamp(ay.max(by), height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let rect = Rect::from_corners(Point::new(50, 10), Point::new(5, 40));
        assert_eq!(rect, Rect { x0: 5, y0: 10, x1: 50, y1: 40 });
        assert_eq!(rect.width(), 45);
        assert_eq!(rect.height(), 30);
        assert_eq!(rect.area(), 45 * 30);
    }

    #[test]
    fn test_clamp_to_image() {
        let rect = Rect { x0: 10, y0: 20, x1: 500, y1: 600 };
        assert_eq!(rect.clamp_to(100, 200), Rect { x0: 10, y0: 20, x1: 100, y1: 200 });
    }

    #[test]
    fn test_clamped_from_signed_handles_negative_and_reversed() {
        let rect = Rect::clamped_from_signed((120, -4), (-8, 30), 100, 50);
        assert_eq!(rect, Rect { x0: 0, y0: 0, x1: 100, y1: 30 });
    }

    #[test]
    fn test_degenerate() {
        assert!(Rect::from_corners(Point::new(3, 3), Point::new(3, 9)).is_degenerate());
        assert!(!Rect::from_corners(Point::new(3, 3), Point::new(4, 9)).is_degenerate());
    }
}
