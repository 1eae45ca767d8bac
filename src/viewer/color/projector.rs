//! Channel projection of BGR buffers.
//!
//! Conversions follow the 8-bit conventions of common image libraries:
//! fixed-point BT.601 luminance for gray, and HSV with hue halved into
//! `0..180` so it fits a byte.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::viewer::buffer::{Channels, PixelBuffer};
use crate::viewer::common::error::{Result, ViewerError};

/// Channel representation shown in the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Unchanged input
    #[default]
    Color,
    /// Luminance
    Gray,
    /// Channel 0 of a BGR buffer
    Blue,
    /// Channel 1 of a BGR buffer
    Green,
    /// Channel 2 of a BGR buffer
    Red,
    /// HSV hue, 0-179
    Hue,
    /// HSV saturation, 0-255
    Saturation,
    /// HSV value, 0-255
    Value,
}

impl ChannelMode {
    pub const ALL: [ChannelMode; 8] = [
        ChannelMode::Color,
        ChannelMode::Gray,
        ChannelMode::Blue,
        ChannelMode::Green,
        ChannelMode::Red,
        ChannelMode::Hue,
        ChannelMode::Saturation,
        ChannelMode::Value,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChannelMode::Color => "color",
            ChannelMode::Gray => "gray",
            ChannelMode::Blue => "blue",
            ChannelMode::Green => "green",
            ChannelMode::Red => "red",
            ChannelMode::Hue => "hue",
            ChannelMode::Saturation => "saturation",
            ChannelMode::Value => "value",
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "color" | "colour" => Ok(ChannelMode::Color),
            "gray" | "grey" => Ok(ChannelMode::Gray),
            "blue" | "b" => Ok(ChannelMode::Blue),
            "green" | "g" => Ok(ChannelMode::Green),
            "red" | "r" => Ok(ChannelMode::Red),
            "hue" | "h" => Ok(ChannelMode::Hue),
            "saturation" | "s" => Ok(ChannelMode::Saturation),
            "value" | "v" => Ok(ChannelMode::Value),
            other => Err(format!("unknown channel mode '{}'", other)),
        }
    }
}

/// Projects `buffer` into `mode`, falling back to the unchanged input when the
/// conversion does not apply (e.g. a color-only mode on a gray buffer).
pub fn project(buffer: &PixelBuffer, mode: ChannelMode) -> PixelBuffer {
    match try_project(buffer, mode) {
        Ok(projected) => projected,
        Err(e) => {
            debug!("Projection to {} skipped: {}", mode, e);
            buffer.clone()
        }
    }
}

/// Projects `buffer` into `mode`, reporting inapplicable conversions.
pub fn try_project(buffer: &PixelBuffer, mode: ChannelMode) -> Result<PixelBuffer> {
    match mode {
        ChannelMode::Color => Ok(buffer.clone()),
        ChannelMode::Gray => Ok(to_gray(buffer)),
        ChannelMode::Blue => extract_channel(buffer, 0),
        ChannelMode::Green => extract_channel(buffer, 1),
        ChannelMode::Red => extract_channel(buffer, 2),
        ChannelMode::Hue => extract_channel(&to_hsv(buffer)?, 0),
        ChannelMode::Saturation => extract_channel(&to_hsv(buffer)?, 1),
        ChannelMode::Value => extract_channel(&to_hsv(buffer)?, 2),
    }
}

/// Luminance of a BGR buffer; single-channel input is returned as is.
pub fn to_gray(buffer: &PixelBuffer) -> PixelBuffer {
    if !buffer.is_color() {
        return buffer.clone();
    }

    let data = buffer
        .data()
        .chunks_exact(3)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect();

    rebuild(buffer, Channels::Gray, data)
}

/// Single channel `index` (0 = blue, 1 = green, 2 = red) of a BGR buffer.
pub fn extract_channel(buffer: &PixelBuffer, index: usize) -> Result<PixelBuffer> {
    if !buffer.is_color() {
        return Err(ViewerError::UnsupportedColorConversion(format!(
            "channel {} requested from a single-channel buffer",
            index
        )));
    }
    if index > 2 {
        return Err(ViewerError::UnsupportedColorConversion(format!(
            "channel index {} out of range",
            index
        )));
    }

    let data = buffer.data().chunks_exact(3).map(|px| px[index]).collect();
    Ok(rebuild(buffer, Channels::Gray, data))
}

/// HSV representation of a BGR buffer, stored as three interleaved channels `[H, S, V]`.
pub fn to_hsv(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    if !buffer.is_color() {
        warn!(
            "HSV conversion requested for a {}-channel buffer",
            buffer.channel_count()
        );
        return Err(ViewerError::UnsupportedColorConversion(
            "HSV needs a three-channel BGR buffer".to_string(),
        ));
    }

    let data = buffer
        .data()
        .chunks_exact(3)
        .flat_map(|px| hsv_pixel(px[0], px[1], px[2]))
        .collect();

    Ok(rebuild(buffer, Channels::Bgr, data))
}

/// HSV buffer for analysis, or `buffer` itself when it has no color to convert.
///
/// The flag is `true` when the returned buffer holds HSV.
pub fn hsv_or_raw(buffer: &PixelBuffer) -> (Cow<'_, PixelBuffer>, bool) {
    match to_hsv(buffer) {
        Ok(hsv) => (Cow::Owned(hsv), true),
        Err(e) => {
            warn!("Falling back to raw values: {}", e);
            (Cow::Borrowed(buffer), false)
        }
    }
}

/// HSV of one BGR pixel: hue in `0..180`, saturation and value in `0..=255`.
pub fn hsv_pixel(b: u8, g: u8, r: u8) -> [u8; 3] {
    let v = b.max(g).max(r);
    let min = b.min(g).min(r);
    let diff = (v - min) as f32;

    let s = if v == 0 {
        0.0
    } else {
        (diff * 255.0 / v as f32).round()
    };

    let h = if diff == 0.0 {
        0.0
    } else {
        let (b, g, r) = (b as f32, g as f32, r as f32);
        let degrees = if v as f32 == r {
            60.0 * (g - b) / diff
        } else if v as f32 == g {
            120.0 + 60.0 * (b - r) / diff
        } else {
            240.0 + 60.0 * (r - g) / diff
        };
        if degrees < 0.0 { degrees + 360.0 } else { degrees }
    };

    let mut hue = (h / 2.0).round() as u16;
    if hue >= 180 {
        hue -= 180;
    }

    [hue as u8, s as u8, v]
}

/// Fixed-point BT.601 luminance (weights sum to 2^14).
fn luminance(b: u8, g: u8, r: u8) -> u8 {
    const B_WEIGHT: u32 = 1868;
    const G_WEIGHT: u32 = 9617;
    const R_WEIGHT: u32 = 4899;
    const ROUND: u32 = 1 << 13;

    ((b as u32 * B_WEIGHT + g as u32 * G_WEIGHT + r as u32 * R_WEIGHT + ROUND) >> 14) as u8
}

fn rebuild(source: &PixelBuffer, channels: Channels, data: Vec<u8>) -> PixelBuffer {
    // dimensions come from a valid buffer and data length matches by construction
    match PixelBuffer::new(source.width(), source.height(), channels, data) {
        Ok(buffer) => buffer,
        Err(_) => source.clone(),
    }
}
