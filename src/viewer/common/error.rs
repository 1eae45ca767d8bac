use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Coordinates out of bounds: x={x}, y={y} (image {width}x{height})")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Unsupported color conversion: {0}")]
    UnsupportedColorConversion(String),

    #[error("Degenerate region: ({x0}, {y0})-({x1}, {y1})")]
    DegenerateRegion {
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to read input: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    #[error("No image loaded in tile {0}")]
    EmptyTile(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
