//! Intensity profiles along a horizontal or vertical line.

use std::str::FromStr;

use crate::viewer::buffer::PixelBuffer;
use crate::viewer::viewport::EDGE_MARGIN;

/// Default band width, in pixels, across the scan line.
pub const DEFAULT_PROFILE_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Scan along x across the full width; band spans rows around y
    Horizontal,
    /// Scan along y across the full height; band spans columns around x
    Vertical,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hor" | "horizontal" | "h" => Ok(Direction::Horizontal),
            "ver" | "vertical" | "v" => Ok(Direction::Vertical),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}

/// Channel sampled by a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileChannel {
    /// Every channel (averaged together in averaged mode)
    #[default]
    All,
    Blue,
    Green,
    Red,
}

impl FromStr for ProfileChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ProfileChannel::All),
            "blue" | "b" => Ok(ProfileChannel::Blue),
            "green" | "g" => Ok(ProfileChannel::Green),
            "red" | "r" => Ok(ProfileChannel::Red),
            other => Err(format!("unknown profile channel '{}'", other)),
        }
    }
}

impl ProfileChannel {
    fn index(self) -> usize {
        match self {
            ProfileChannel::All | ProfileChannel::Blue => 0,
            ProfileChannel::Green => 1,
            ProfileChannel::Red => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileOptions {
    /// Band width across the scan line
    pub width: usize,
    /// Collapse the band to one mean value per position
    pub averaged: bool,
    pub channel: ProfileChannel,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_PROFILE_WIDTH,
            averaged: true,
            channel: ProfileChannel::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileData {
    /// One mean intensity per scan position
    Averaged(Vec<f64>),
    /// Band samples per scan position (`[position][band offset]`)
    Raw(Vec<Vec<u8>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileResult {
    pub direction: Direction,
    /// Sampled band across the scan line, `start..end`
    pub band: (usize, usize),
    /// Scan-axis positions, `0..extent`
    pub positions: Vec<usize>,
    pub data: ProfileData,
}

impl ProfileResult {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Averaged values, if this is an averaged profile.
    pub fn values(&self) -> Option<&[f64]> {
        match &self.data {
            ProfileData::Averaged(values) => Some(values),
            ProfileData::Raw(_) => None,
        }
    }
}

/// Extracts the profile through `(x, y)` along `direction`.
///
/// The output covers the full scan axis; the band across it is centred on the
/// line, truncated at the leading edge and kept `EDGE_MARGIN` pixels off the
/// trailing edge.
pub fn extract(
    buffer: &PixelBuffer,
    x: usize,
    y: usize,
    direction: Direction,
    options: &ProfileOptions,
) -> ProfileResult {
    let (scan_extent, across_extent, center) = match direction {
        Direction::Horizontal => (buffer.width(), buffer.height(), y),
        Direction::Vertical => (buffer.height(), buffer.width(), x),
    };

    let (start, end) = band(center, options.width, across_extent);
    let channels = buffer.channel_count();
    let selected = if channels == 1 { 0 } else { options.channel.index() };

    let sample = |scan: usize, across: usize| {
        let (px, py) = match direction {
            Direction::Horizontal => (scan, across),
            Direction::Vertical => (across, scan),
        };
        let row = buffer.row(py);
        &row[px * channels..(px + 1) * channels]
    };

    let data = if options.averaged {
        let all = options.channel == ProfileChannel::All || channels == 1;
        let values = (0..scan_extent)
            .map(|scan| {
                let mut sum = 0u64;
                let mut count = 0u64;
                for across in start..end {
                    let px = sample(scan, across);
                    if all {
                        sum += px.iter().map(|&v| v as u64).sum::<u64>();
                        count += px.len() as u64;
                    } else {
                        sum += px[selected] as u64;
                        count += 1;
                    }
                }
                sum as f64 / count as f64
            })
            .collect();
        ProfileData::Averaged(values)
    } else {
        let rows = (0..scan_extent)
            .map(|scan| (start..end).map(|across| sample(scan, across)[selected]).collect())
            .collect();
        ProfileData::Raw(rows)
    };

    ProfileResult {
        direction,
        band: (start, end),
        positions: (0..scan_extent).collect(),
        data,
    }
}

/// Band `start..end` of roughly `width` lines around `center`, never empty.
fn band(center: usize, width: usize, extent: usize) -> (usize, usize) {
    let half = width.saturating_sub(1) as f64 / 2.0;
    let upper = extent.saturating_sub(EDGE_MARGIN) as f64;

    let start = ((center as f64 - half).max(0.0) as usize).min(extent - 1);
    let end = (center as f64 + half).min(upper) as usize;

    if end > start {
        (start, end)
    } else {
        (start, start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::buffer::Channels;

    #[test]
    fn test_constant_image_profile_is_constant() {
        let buffer = PixelBuffer::filled(300, 200, Channels::Gray, &[128]).unwrap();

        let result = extract(&buffer, 40, 100, Direction::Horizontal, &ProfileOptions::default());

        assert_eq!(result.len(), 300);
        assert!(result.values().unwrap().iter().all(|&v| v == 128.0));
    }

    #[test]
    fn test_band_is_centred_and_clamped() {
        assert_eq!(band(100, 20, 200), (90, 109));
        assert_eq!(band(3, 20, 200), (0, 12));
        // trailing edge keeps the margin
        assert_eq!(band(198, 20, 200), (188, 195));
        // degenerate widths still sample one line
        assert_eq!(band(50, 1, 200), (50, 51));
        assert_eq!(band(0, 20, 3), (0, 1));
    }

    #[test]
    fn test_vertical_profile_covers_height() {
        let buffer = PixelBuffer::from_fn(60, 80, Channels::Gray, |_, y| [y as u8, 0, 0]).unwrap();

        let result = extract(&buffer, 30, 0, Direction::Vertical, &ProfileOptions::default());

        assert_eq!(result.len(), 80);
        assert_eq!(result.positions[79], 79);
        let values = result.values().unwrap();
        for (y, &v) in values.iter().enumerate() {
            assert_eq!(v, y as f64);
        }
    }

    #[test]
    fn test_averaged_all_channels_vs_single_channel() {
        let buffer = PixelBuffer::filled(50, 50, Channels::Bgr, &[30, 60, 90]).unwrap();

        let all = extract(&buffer, 10, 10, Direction::Horizontal, &ProfileOptions::default());
        let red = extract(
            &buffer,
            10,
            10,
            Direction::Horizontal,
            &ProfileOptions { channel: ProfileChannel::Red, ..Default::default() },
        );

        assert!(all.values().unwrap().iter().all(|&v| v == 60.0));
        assert!(red.values().unwrap().iter().all(|&v| v == 90.0));
    }

    #[test]
    fn test_raw_profile_is_transposed_band() {
        let buffer = PixelBuffer::from_fn(40, 30, Channels::Gray, |x, y| {
            [(x + y) as u8, 0, 0]
        })
        .unwrap();
        let options = ProfileOptions { width: 5, averaged: false, ..Default::default() };

        let result = extract(&buffer, 0, 10, Direction::Horizontal, &options);

        assert_eq!(result.band, (8, 12));
        let ProfileData::Raw(rows) = &result.data else {
            panic!("expected raw profile");
        };
        assert_eq!(rows.len(), 40);
        assert_eq!(rows[3], vec![11, 12, 13, 14]);
    }

    #[test]
    fn test_raw_profile_selects_channel() {
        let buffer = PixelBuffer::filled(20, 20, Channels::Bgr, &[1, 2, 3]).unwrap();
        let options = ProfileOptions {
            width: 3,
            averaged: false,
            channel: ProfileChannel::Green,
        };

        let result = extract(&buffer, 5, 5, Direction::Vertical, &options);

        let ProfileData::Raw(rows) = &result.data else {
            panic!("expected raw profile");
        };
        assert_eq!(rows.len(), 20);
        assert!(rows.iter().flatten().all(|&v| v == 2));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("hor".parse::<Direction>(), Ok(Direction::Horizontal));
        assert_eq!("Vertical".parse::<Direction>(), Ok(Direction::Vertical));
        assert!("diag".parse::<Direction>().is_err());
    }
}
