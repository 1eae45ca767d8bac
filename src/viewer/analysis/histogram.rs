//! Per-channel 256-bin histograms over rectangular regions.

use tracing::debug;

use crate::viewer::buffer::PixelBuffer;
use crate::viewer::common::error::{Result, ViewerError};
use crate::viewer::common::geometry::Rect;

/// Bins per channel, one per 8-bit intensity.
pub const BINS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistogram {
    pub bins: [u64; BINS],
}

impl ChannelHistogram {
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Most populated intensity (lowest one on ties).
    pub fn peak(&self) -> u8 {
        let mut best = 0;
        for (i, &count) in self.bins.iter().enumerate() {
            if count > self.bins[best] {
                best = i;
            }
        }
        best as u8
    }

    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: u64 = self.bins.iter().enumerate().map(|(v, &c)| v as u64 * c).sum();
        weighted as f64 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramResult {
    /// Region actually counted, after normalization and clamping
    pub region: Rect,
    /// One histogram per buffer channel, in buffer channel order
    pub channels: Vec<ChannelHistogram>,
}

impl HistogramResult {
    pub fn pixel_count(&self) -> usize {
        self.region.area()
    }
}

/// Counts intensities inside the rectangle spanned by two corners.
///
/// Corners may come in any order and lie outside the image; the region is
/// normalized and clamped to `[0, width] x [0, height]`. A region with no area
/// yields [`ViewerError::DegenerateRegion`].
pub fn histogram(buffer: &PixelBuffer, a: (i64, i64), b: (i64, i64)) -> Result<HistogramResult> {
    let region = Rect::clamped_from_signed(a, b, buffer.width(), buffer.height());
    if region.is_degenerate() {
        return Err(ViewerError::DegenerateRegion {
            x0: a.0,
            y0: a.1,
            x1: b.0,
            y1: b.1,
        });
    }

    let count = buffer.channel_count();
    let mut channels = vec![ChannelHistogram { bins: [0; BINS] }; count];

    for y in region.y0..region.y1 {
        let row = &buffer.row(y)[region.x0 * count..region.x1 * count];
        for px in row.chunks_exact(count) {
            for (hist, &v) in channels.iter_mut().zip(px) {
                hist.bins[v as usize] += 1;
            }
        }
    }

    debug!(?region, channels = count, "Histogram computed");
    Ok(HistogramResult { region, channels })
}
