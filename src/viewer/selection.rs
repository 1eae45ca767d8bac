//! Region selection module
//!
//! This module provides the press/drag/release gesture state machine that
//! produces the crop/zoom rectangle in native-image coordinates.

mod selector;

#[cfg(test)]
mod tests;

pub use selector::{CropPolicy, DragOutcome, RegionSelector, SelectionState};
