//! Common utilities module
//!
//! This module contains the error type and geometry shared across the viewer.

pub mod error;
pub mod geometry;

pub use error::{ViewerError, Result};
pub use geometry::{Point, Rect};
