//! Region analytics module
//!
//! This module provides point lookups, line profiles, rectangular histograms and
//! cross-hair measurements against native-image buffers.

mod inspector;
mod profile;
mod histogram;
mod measure;

pub use inspector::{HsvReading, PixelValue, hsv_at, value_at};
pub use profile::{
    DEFAULT_PROFILE_WIDTH,
    Direction,
    ProfileChannel,
    ProfileData,
    ProfileOptions,
    ProfileResult,
    extract,
};
pub use histogram::{BINS, ChannelHistogram, HistogramResult, histogram};
pub use measure::{Measurement, measure};
