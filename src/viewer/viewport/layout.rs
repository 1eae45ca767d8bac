//! Tile grid layout of the display frame.

/// Fraction of each grid cell given to the image, leaving padding around tiles.
pub const TILE_MARGIN: f64 = 0.95;

/// Rows x columns grid of image tiles inside a display frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    pub rows: usize,
    pub cols: usize,
    pub margin: f64,
}

impl TileLayout {
    pub fn new(rows: usize, cols: usize, margin: f64) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            margin,
        }
    }

    /// Number of images shown at once.
    pub fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Box, as `(height, width)`, each image is fitted into for a frame of the given size.
    pub fn tile_box(&self, frame_height: usize, frame_width: usize) -> (usize, usize) {
        let h = (frame_height as f64 / self.rows as f64 * self.margin) as usize;
        let w = (frame_width as f64 / self.cols as f64 * self.margin) as usize;
        (h.max(1), w.max(1))
    }

    /// Grid cell `(row, col)` of tile `index`, filled row by row.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}

impl Default for TileLayout {
    fn default() -> Self {
        Self::new(1, 1, TILE_MARGIN)
    }
}
