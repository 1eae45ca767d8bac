use crate::viewer::buffer::PixelBuffer;
use crate::viewer::common::geometry::{Point, Rect};
use crate::viewer::viewport::CoordinateMapper;

use super::draw::{Color, draw_cross, draw_rectangle};

/// User-placed marker, stored in native image coordinates so it survives
/// zoom and tile resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Cross { x: usize, y: usize },
    Rectangle(Rect),
}

impl Annotation {
    pub fn cross(point: Point) -> Self {
        Annotation::Cross {
            x: point.x,
            y: point.y,
        }
    }

    /// Draws the annotation onto a display buffer produced with `mapper`.
    pub fn render(
        &self,
        display: &PixelBuffer,
        mapper: &CoordinateMapper,
        thickness: usize,
        color: Color,
    ) -> PixelBuffer {
        match *self {
            Annotation::Cross { x, y } => {
                let (dx, dy) = mapper.to_display(x, y);
                draw_cross(display, dx, dy, thickness, color)
            }
            Annotation::Rectangle(rect) => {
                let (x0, y0, x1, y1) = mapper.rect_to_display(&rect);
                draw_rectangle(display, x0, x1, y0, y1, thickness, color)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::buffer::Channels;

    #[test]
    fn test_cross_is_mapped_to_display() {
        // 200x100 native shown at half size
        let mapper = CoordinateMapper::new(0.5, Point::default(), 200, 100);
        let display = PixelBuffer::filled(100, 50, Channels::Gray, &[0]).unwrap();

        let drawn = Annotation::cross(Point::new(60, 40)).render(&display, &mapper, 1, Color::bgr(9, 9, 9));

        assert_eq!(drawn.pixel(30, 0).unwrap(), &[9]);
        assert_eq!(drawn.pixel(0, 20).unwrap(), &[9]);
        assert_eq!(drawn.pixel(31, 21).unwrap(), &[0]);
    }

    #[test]
    fn test_rectangle_respects_crop_offset() {
        // Crop origin at (50, 50), displayed 1:1
        let mapper = CoordinateMapper::new(1.0, Point::new(50, 50), 300, 300);
        let display = PixelBuffer::filled(100, 100, Channels::Gray, &[0]).unwrap();
        let rect = Rect { x0: 60, y0: 60, x1: 90, y1: 90 };

        let drawn = Annotation::Rectangle(rect).render(&display, &mapper, 1, Color::bgr(5, 5, 5));

        assert_eq!(drawn.pixel(10, 20).unwrap(), &[5]);
        assert_eq!(drawn.pixel(40, 20).unwrap(), &[5]);
        assert_eq!(drawn.pixel(25, 25).unwrap(), &[0]);
    }
}
