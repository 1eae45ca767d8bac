//! Image viewer core
//!
//! This module provides the coordinate-mapping and region-analytics engine of the
//! viewer: channel projection, fit-to-tile scaling, display/native coordinate
//! mapping, crop/zoom selection, pixel inspection, profiles, histograms and overlays.

pub mod common;
pub mod buffer;
pub mod color;
pub mod viewport;
pub mod selection;
pub mod analysis;
pub mod overlay;
pub mod io;
pub mod config;
pub mod session;
pub mod timing;

pub use common::{
    Point,
    Rect,
    Result,
    ViewerError,
};

pub use buffer::{
    Channels,
    PixelBuffer,
};

pub use color::{
    ChannelMode,
    IntensityTransform,
    PixelTransform,
    project,
    try_project,
};

pub use viewport::{
    CoordinateMapper,
    Fit,
    FitTransform,
    TileLayout,
    fit,
};

pub use selection::{
    CropPolicy,
    DragOutcome,
    RegionSelector,
    SelectionState,
};

pub use analysis::{
    Direction,
    HistogramResult,
    HsvReading,
    Measurement,
    PixelValue,
    ProfileChannel,
    ProfileData,
    ProfileOptions,
    ProfileResult,
};

pub use overlay::{
    Annotation,
    Color,
};

pub use io::{
    ImageCatalog,
    ImageReader,
    ImageWriter,
    PageMove,
    RasterImageReader,
    StandardTiffWriter,
    TiffImageReader,
};

pub use config::{
    TiffCompression,
    ViewerConfig,
    ViewerConfigBuilder,
};

pub use session::{
    HistogramReport,
    InteractionMode,
    PointInfo,
    ViewerEvent,
    ViewerSession,
};
