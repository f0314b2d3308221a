//! Result types returned by the framing entry points.

use crate::error::ReelframeError;
use crate::pipeline::encode;
use crate::pipeline::palette::Color;
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

/// Where the resized screenshot landed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Left offset in canvas pixels.
    pub x: u32,
    /// Top offset in canvas pixels.
    pub y: u32,
    /// Width of the pasted image after resizing.
    pub width: u32,
    /// Height of the pasted image after resizing.
    pub height: u32,
}

impl Placement {
    /// Whether canvas pixel `(x, y)` is covered by the pasted image.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Counters collected while composing one canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub source_width: u32,
    pub source_height: u32,
    /// Pixel writes made by corner cleanup.
    pub corner_pixels_replaced: u64,
    /// Wall-clock time spent composing (cleanup, resize, paste).
    pub duration_ms: u64,
}

/// A finished canvas plus everything needed to explain how it was built.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// The canvas, exactly the configured size.
    pub canvas: RgbImage,
    /// Fill color: the dominant color of the corner-cleaned screenshot.
    pub background: Color,
    pub placement: Placement,
    pub stats: FrameStats,
}

impl FrameOutput {
    /// Serialise the canvas as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ReelframeError> {
        encode::encode_png(&self.canvas)
    }

    /// Serialise the canvas as a base64 PNG string.
    pub fn to_base64_png(&self) -> Result<String, ReelframeError> {
        encode::encode_base64_png(&self.canvas)
    }

    /// Consume the output and return the canvas as a `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        DynamicImage::ImageRgb8(self.canvas)
    }

    /// Pixel-free summary suitable for JSON output.
    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            canvas_width: self.canvas.width(),
            canvas_height: self.canvas.height(),
            background: self.background,
            placement: self.placement,
            stats: self.stats.clone(),
        }
    }
}

/// Serializable description of a [`FrameOutput`] without its pixels.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSummary {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color,
    pub placement: Placement,
    pub stats: FrameStats,
}

/// What [`crate::inspect`] reports about an input image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Pixel layout before RGB normalisation, e.g. `Rgba8`.
    pub color_type: String,
    /// Dominant color of the raw image, before corner cleanup.
    pub dominant_color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_contains_is_half_open() {
        let p = Placement {
            x: 2,
            y: 3,
            width: 4,
            height: 5,
        };
        assert!(p.contains(2, 3));
        assert!(p.contains(5, 7));
        assert!(!p.contains(6, 3));
        assert!(!p.contains(2, 8));
        assert!(!p.contains(1, 3));
    }

    #[test]
    fn summary_serialises_background_as_hex() {
        let out = FrameOutput {
            canvas: RgbImage::new(4, 6),
            background: Color::new(0, 0, 255),
            placement: Placement {
                x: 1,
                y: 1,
                width: 2,
                height: 4,
            },
            stats: FrameStats::default(),
        };
        let json = serde_json::to_value(out.summary()).unwrap();
        assert_eq!(json["background"], "#0000ff");
        assert_eq!(json["canvas_width"], 4);
        assert_eq!(json["placement"]["height"], 4);
    }
}
