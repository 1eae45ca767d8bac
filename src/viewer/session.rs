//! Viewer session module
//!
//! This module wires every viewer component into one explicit session: the
//! image catalog and current page, the per-tile render pipeline, the pointer
//! gesture handlers and the analyses they trigger.

mod types;
mod viewer_session;


pub use types::{HistogramReport, InteractionMode, PointInfo, ViewerEvent};
pub use viewer_session::{DEFAULT_FRAME_SIZE, ViewerSession};
