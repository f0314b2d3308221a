//! Corner cleanup: repaint bright artefacts in the four image corners.
//!
//! Screenshots often carry rounded-corner masks, status-bar glare or
//! compression noise in their corners. Left alone those pixels skew the
//! background color sampled by the compositor. Each corner square is scanned
//! and every pixel whose channel mean exceeds the brightness threshold is
//! replaced with the dominant color of the original image.

use crate::error::ReelframeError;
use crate::pipeline::decode::ensure_rgb;
use crate::pipeline::palette::{dominant_color, Color};
use image::{DynamicImage, RgbImage};
use tracing::debug;

/// Which corner a [`CornerRegion`] is anchored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A half-open rectangle `[row_start, row_end) × [col_start, col_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerRegion {
    pub corner: Corner,
    pub row_start: u32,
    pub row_end: u32,
    pub col_start: u32,
    pub col_end: u32,
}

impl CornerRegion {
    /// The four corner squares of a `width × height` image, clamped to the
    /// image bounds. Order: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(width: u32, height: u32, size: u32) -> [CornerRegion; 4] {
        let near_rows = (0, size.min(height));
        let far_rows = (height.saturating_sub(size), height);
        let near_cols = (0, size.min(width));
        let far_cols = (width.saturating_sub(size), width);

        let region = |corner: Corner,
                      (row_start, row_end): (u32, u32),
                      (col_start, col_end): (u32, u32)| CornerRegion {
            corner,
            row_start,
            row_end,
            col_start,
            col_end,
        };

        [
            region(Corner::TopLeft, near_rows, near_cols),
            region(Corner::TopRight, near_rows, far_cols),
            region(Corner::BottomLeft, far_rows, near_cols),
            region(Corner::BottomRight, far_rows, far_cols),
        ]
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.col_start..self.col_end).contains(&x) && (self.row_start..self.row_end).contains(&y)
    }

    pub fn area(&self) -> u64 {
        (self.row_end - self.row_start) as u64 * (self.col_end - self.col_start) as u64
    }
}

/// Result of a corner cleanup pass.
#[derive(Debug, Clone)]
pub struct CleanedImage {
    pub image: RgbImage,
    /// Dominant color of the image before cleanup; the replacement color.
    pub fill: Option<Color>,
    /// Number of pixel writes performed. Pixels in overlapping regions
    /// count once per region that repainted them.
    pub replaced: u64,
}

/// Clean the corners of an RGB image.
///
/// Never fails: regions larger than the image shrink to its bounds. An
/// empty image is returned unchanged.
pub fn clean_corners(img: &RgbImage, corner_size: u32, brightness_threshold: f32) -> CleanedImage {
    let mut out = img.clone();
    let Some(fill) = dominant_color(img) else {
        return CleanedImage {
            image: out,
            fill: None,
            replaced: 0,
        };
    };
    let fill_px = fill.to_rgb();

    let mut replaced = 0u64;
    for region in CornerRegion::corners(img.width(), img.height(), corner_size) {
        for y in region.row_start..region.row_end {
            for x in region.col_start..region.col_end {
                let px = out.get_pixel_mut(x, y);
                if Color::from(*px).mean() > brightness_threshold {
                    *px = fill_px;
                    replaced += 1;
                }
            }
        }
    }

    debug!(
        width = img.width(),
        height = img.height(),
        corner_size,
        brightness_threshold,
        fill = %fill,
        replaced,
        "Corner cleanup complete"
    );

    CleanedImage {
        image: out,
        fill: Some(fill),
        replaced,
    }
}

/// Clean the corners of a decoded image that must already be 3-channel.
///
/// Fails with [`ReelframeError::Shape`] for gray or alpha images.
pub fn clean(
    img: &DynamicImage,
    corner_size: u32,
    brightness_threshold: f32,
) -> Result<RgbImage, ReelframeError> {
    let rgb = ensure_rgb(img)?;
    Ok(clean_corners(&rgb, corner_size, brightness_threshold).image)
}
