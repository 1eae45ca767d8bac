use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::viewer::analysis::{HistogramResult, HsvReading, Measurement, PixelValue, ProfileResult};

/// What pointer gestures on a tile do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Drag selects the zoom/crop region
    #[default]
    Info,
    /// Click extracts a horizontal line profile
    ProfileHorizontal,
    /// Click extracts a vertical line profile
    ProfileVertical,
    /// Click places a cross-hair; pointer motion then reports distances to it
    Cross,
    /// Drag selects a rectangle and reports its histogram
    Histogram,
    /// As `Histogram`, on the HSV conversion of the tile
    HistogramHsv,
}

impl InteractionMode {
    pub const ALL: [InteractionMode; 6] = [
        InteractionMode::Info,
        InteractionMode::ProfileHorizontal,
        InteractionMode::ProfileVertical,
        InteractionMode::Cross,
        InteractionMode::Histogram,
        InteractionMode::HistogramHsv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionMode::Info => "Info",
            InteractionMode::ProfileHorizontal => "Profile(Hor)",
            InteractionMode::ProfileVertical => "Profile(Ver)",
            InteractionMode::Cross => "Cross",
            InteractionMode::Histogram => "Histogram",
            InteractionMode::HistogramHsv => "Histogram(HSV)",
        }
    }

    pub fn is_histogram(self) -> bool {
        matches!(self, InteractionMode::Histogram | InteractionMode::HistogramHsv)
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.to_ascii_lowercase().as_str() {
            "info" => InteractionMode::Info,
            "profile(hor)" | "profile-hor" | "hor" => InteractionMode::ProfileHorizontal,
            "profile(ver)" | "profile-ver" | "ver" => InteractionMode::ProfileVertical,
            "cross" => InteractionMode::Cross,
            "histogram" => InteractionMode::Histogram,
            "histogram(hsv)" | "histogram-hsv" => InteractionMode::HistogramHsv,
            other => return Err(format!("unknown interaction mode '{}'", other)),
        };
        Ok(mode)
    }
}

/// Labelled histogram of a selected rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramReport {
    /// One label per histogram channel
    pub labels: Vec<&'static str>,
    pub result: HistogramResult,
}

impl HistogramReport {
    pub fn new(result: HistogramResult, hsv: bool) -> Self {
        let labels = match (result.channels.len(), hsv) {
            (1, _) => vec!["value"],
            (_, true) => vec!["Hue", "Saturation", "Value"],
            (_, false) => vec!["Blue", "Green", "Red"],
        };
        Self { labels, result }
    }
}

/// Result of a pointer event, telling the caller what to refresh
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// Display buffers were rebuilt
    Redraw,
    /// Only overlays changed (gesture draft)
    PreviewRedraw,
    Profile(ProfileResult),
    Histogram(HistogramReport),
    /// Nothing to refresh
    Ignored,
}

/// Everything known about the native pixel under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct PointInfo {
    pub path: PathBuf,
    /// Name of the directory holding the file
    pub dir: String,
    pub file: String,
    /// Catalog index of the image
    pub index: usize,
    pub tile: usize,
    /// Native-to-display scale of the tile
    pub ratio: f64,
    pub x: usize,
    pub y: usize,
    pub value: PixelValue,
    pub hsv: HsvReading,
    pub width: usize,
    pub height: usize,
    /// Distance to the cross-hair, when one is placed
    pub measurement: Option<Measurement>,
}

impl fmt::Display for PointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "path: {}", self.path.display())?;
        writeln!(f, "dir: {}", self.dir)?;
        writeln!(f, "file: {}", self.file)?;
        writeln!(f, "img_h: {}", self.height)?;
        writeln!(f, "img_w: {}", self.width)?;
        writeln!(f, "X: {} Y: {}", self.x, self.y)?;
        writeln!(f, "value: {}", self.value)?;
        write!(f, "HSV: {}", self.hsv)?;
        if let Some(m) = &self.measurement {
            write!(f, "\nW: {:.1}, H: {:.1}", m.width, m.height)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_parse_back() {
        for mode in InteractionMode::ALL {
            assert_eq!(mode.as_str().parse::<InteractionMode>().unwrap(), mode);
        }
        assert!("zoom".parse::<InteractionMode>().is_err());
    }
}
