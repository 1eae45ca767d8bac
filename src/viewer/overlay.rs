mod canvas;
mod draw;
mod annotation;

pub use annotation::Annotation;
pub use draw::{Color, draw_cross, draw_rectangle, scaled_thickness};
