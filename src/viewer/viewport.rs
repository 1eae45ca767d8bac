//! Viewport module
//!
//! This module fits native buffers into display tiles and maps pointer
//! coordinates between display space and native-image space.

mod fit;
mod mapper;
mod layout;

pub use fit::{Fit, fit, resize};
pub use mapper::{CoordinateMapper, EDGE_MARGIN, FitTransform};
pub use layout::{TILE_MARGIN, TileLayout};
