//! Viewer configuration types

use std::time::Duration;

use crate::viewer::overlay::Color;
use crate::viewer::selection::CropPolicy;
use crate::viewer::viewport::{TILE_MARGIN, TileLayout};

/// Largest number of tile rows or columns in the grid.
pub const MAX_GRID: usize = 3;

/// TIFF compression methods used when saving a display buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Configuration for a viewer session
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Tile grid rows (1 to 3)
    pub rows: usize,
    /// Tile grid columns (1 to 3)
    pub cols: usize,
    /// Fraction of a grid cell given to the image
    pub tile_margin: f64,
    /// Wildcard pattern for file names when scanning a directory
    pub pattern: String,
    /// Micrometres per native pixel, for cross measurements
    pub pixel_pitch: f64,
    /// Minimum interval between two processed drag events
    pub drag_interval: Duration,
    /// Minimum per-axis extent of a committed selection
    pub min_selection_extent: usize,
    /// Band width of line profiles
    pub profile_width: usize,
    /// Base stroke width of overlays
    pub overlay_thickness: usize,
    pub overlay_color: Color,
    pub crop_policy: CropPolicy,
    /// Compression used by `save_display`
    pub compression: TiffCompression,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            tile_margin: TILE_MARGIN,
            pattern: "*.*".to_string(),
            pixel_pitch: 1.0,
            drag_interval: Duration::from_millis(100),
            min_selection_extent: 5,
            profile_width: 20,
            overlay_thickness: 2,
            overlay_color: Color::default(),
            crop_policy: CropPolicy::Crop,
            compression: TiffCompression::None,
        }
    }
}

impl ViewerConfig {
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::default()
    }

    pub fn layout(&self) -> TileLayout {
        TileLayout::new(self.rows, self.cols, self.tile_margin)
    }
}

/// Builder for ViewerConfig
#[derive(Default)]
pub struct ViewerConfigBuilder {
    rows: Option<usize>,
    cols: Option<usize>,
    tile_margin: Option<f64>,
    pattern: Option<String>,
    pixel_pitch: Option<f64>,
    drag_interval: Option<Duration>,
    min_selection_extent: Option<usize>,
    profile_width: Option<usize>,
    overlay_thickness: Option<usize>,
    overlay_color: Option<Color>,
    crop_policy: Option<CropPolicy>,
    compression: Option<TiffCompression>,
}

impl ViewerConfigBuilder {
    pub fn grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = Some(rows);
        self.cols = Some(cols);
        self
    }

    pub fn tile_margin(mut self, margin: f64) -> Self {
        self.tile_margin = Some(margin);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn pixel_pitch(mut self, pitch: f64) -> Self {
        self.pixel_pitch = Some(pitch);
        self
    }

    pub fn drag_interval(mut self, interval: Duration) -> Self {
        self.drag_interval = Some(interval);
        self
    }

    pub fn min_selection_extent(mut self, extent: usize) -> Self {
        self.min_selection_extent = Some(extent);
        self
    }

    pub fn profile_width(mut self, width: usize) -> Self {
        self.profile_width = Some(width);
        self
    }

    pub fn overlay_thickness(mut self, thickness: usize) -> Self {
        self.overlay_thickness = Some(thickness);
        self
    }

    pub fn overlay_color(mut self, color: Color) -> Self {
        self.overlay_color = Some(color);
        self
    }

    pub fn crop_policy(mut self, policy: CropPolicy) -> Self {
        self.crop_policy = Some(policy);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Grid dimensions are clamped to `1..=3`.
    pub fn build(self) -> ViewerConfig {
        let default = ViewerConfig::default();
        ViewerConfig {
            rows: self.rows.unwrap_or(default.rows).clamp(1, MAX_GRID),
            cols: self.cols.unwrap_or(default.cols).clamp(1, MAX_GRID),
            tile_margin: self.tile_margin.unwrap_or(default.tile_margin),
            pattern: self.pattern.unwrap_or(default.pattern),
            pixel_pitch: self.pixel_pitch.unwrap_or(default.pixel_pitch),
            drag_interval: self.drag_interval.unwrap_or(default.drag_interval),
            min_selection_extent: self.min_selection_extent.unwrap_or(default.min_selection_extent),
            profile_width: self.profile_width.unwrap_or(default.profile_width),
            overlay_thickness: self.overlay_thickness.unwrap_or(default.overlay_thickness),
            overlay_color: self.overlay_color.unwrap_or(default.overlay_color),
            crop_policy: self.crop_policy.unwrap_or(default.crop_policy),
            compression: self.compression.unwrap_or(default.compression),
        }
    }
}
