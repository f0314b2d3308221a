//! Configuration types for screenshot framing.
//!
//! All compositing behaviour is controlled through [`FrameConfig`], built via
//! its [`FrameConfigBuilder`]. Every tunable that used to be a hard-coded
//! constant (canvas size, corner size, brightness threshold, upscale policy)
//! lives here so tests and front ends can vary it.

use crate::error::ReelframeError;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Default canvas width in pixels (vertical 9:16 video frame).
pub const DEFAULT_CANVAS_WIDTH: u32 = 1080;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1920;
/// Default side length of each corner cleanup square.
pub const DEFAULT_CORNER_SIZE: u32 = 50;
/// Default brightness threshold on the mean-of-channels scale (0–255).
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f32 = 1.0;
/// Largest canvas side accepted by the builder.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Configuration for framing a screenshot onto a canvas.
///
/// Built via [`FrameConfig::builder()`] or using [`FrameConfig::default()`].
///
/// # Example
/// ```rust
/// use reelframe::FrameConfig;
///
/// let config = FrameConfig::builder()
///     .canvas_size(720, 1280)
///     .corner_size(32)
///     .allow_upscale(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.canvas_size(), (720, 1280));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Canvas width in pixels. Default: 1080.
    pub canvas_width: u32,

    /// Canvas height in pixels. Default: 1920.
    pub canvas_height: u32,

    /// Side length of the square cleaned at each image corner. Default: 50.
    ///
    /// Regions shrink to the image bounds on images smaller than this.
    /// Zero disables corner cleanup.
    pub corner_size: u32,

    /// A corner pixel is replaced when the mean of its three channels is
    /// strictly greater than this value. Default: 1.0.
    ///
    /// The default classifies every pixel that is not near-black as bright,
    /// so in practice almost the whole corner square is repainted with the
    /// dominant color. Raise it (e.g. to 200) to only remove glare and
    /// white rounded-corner artefacts.
    pub brightness_threshold: f32,

    /// Scale images that already fit inside the canvas up to fill it.
    /// Default: false (small screenshots keep their native size).
    pub allow_upscale: bool,

    /// Resampling filter used when resizing. Default: Lanczos3.
    pub filter: ResampleFilter,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            corner_size: DEFAULT_CORNER_SIZE,
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            allow_upscale: false,
            filter: ResampleFilter::default(),
            download_timeout_secs: 120,
        }
    }
}

impl FrameConfig {
    /// Create a new builder for `FrameConfig`.
    pub fn builder() -> FrameConfigBuilder {
        FrameConfigBuilder {
            config: Self::default(),
        }
    }

    /// Canvas size as `(width, height)`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Check the invariants the compositor relies on.
    ///
    /// Called by [`FrameConfigBuilder::build`] and again by the compositor,
    /// since the fields are public and may be edited after building.
    pub fn validate(&self) -> Result<(), ReelframeError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ReelframeError::InvalidDimensions {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.canvas_width > MAX_CANVAS_SIDE || self.canvas_height > MAX_CANVAS_SIDE {
            return Err(ReelframeError::InvalidConfig(format!(
                "canvas sides must be at most {MAX_CANVAS_SIDE}px, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !self.brightness_threshold.is_finite() {
            return Err(ReelframeError::InvalidConfig(format!(
                "brightness threshold must be a finite number, got {}",
                self.brightness_threshold
            )));
        }
        Ok(())
    }
}

/// Builder for [`FrameConfig`].
#[derive(Debug)]
pub struct FrameConfigBuilder {
    config: FrameConfig,
}

impl FrameConfigBuilder {
    pub fn canvas_size(mut self, width: u32, height: u32) -> Self {
        self.config.canvas_width = width;
        self.config.canvas_height = height;
        self
    }

    pub fn canvas_width(mut self, width: u32) -> Self {
        self.config.canvas_width = width;
        self
    }

    pub fn canvas_height(mut self, height: u32) -> Self {
        self.config.canvas_height = height;
        self
    }

    pub fn corner_size(mut self, size: u32) -> Self {
        self.config.corner_size = size;
        self
    }

    pub fn brightness_threshold(mut self, threshold: f32) -> Self {
        self.config.brightness_threshold = threshold;
        self
    }

    pub fn allow_upscale(mut self, v: bool) -> Self {
        self.config.allow_upscale = v;
        self
    }

    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.config.filter = filter;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<FrameConfig, ReelframeError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Resampling filter applied when the screenshot is resized.
///
/// Lanczos3 is the default: screenshots are mostly text and UI edges, and a
/// windowed-sinc filter keeps them crisp without aliasing when downscaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Nearest neighbour. Fast, blocky.
    Nearest,
    /// Linear (tent) filter.
    Triangle,
    /// Cubic Catmull-Rom spline.
    CatmullRom,
    /// Gaussian filter. Slightly soft.
    Gaussian,
    /// Windowed sinc with a 3-lobe window. (default)
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_vertical_frame() {
        let c = FrameConfig::default();
        assert_eq!(c.canvas_size(), (1080, 1920));
        assert_eq!(c.corner_size, 50);
        assert_eq!(c.brightness_threshold, 1.0);
        assert!(!c.allow_upscale);
        assert_eq!(c.filter, ResampleFilter::Lanczos3);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_width_rejected_at_build() {
        let err = FrameConfig::builder().canvas_size(0, 1920).build().unwrap_err();
        assert!(matches!(
            err,
            ReelframeError::InvalidDimensions {
                width: 0,
                height: 1920
            }
        ));
    }

    #[test]
    fn zero_height_rejected_at_build() {
        let err = FrameConfig::builder().canvas_height(0).build().unwrap_err();
        assert!(matches!(err, ReelframeError::InvalidDimensions { .. }));
    }

    #[test]
    fn oversized_canvas_rejected() {
        let err = FrameConfig::builder()
            .canvas_size(MAX_CANVAS_SIDE + 1, 100)
            .build()
            .unwrap_err();
        assert!(matches!(err, ReelframeError::InvalidConfig(_)));
    }

    #[test]
    fn nan_threshold_rejected() {
        let err = FrameConfig::builder()
            .brightness_threshold(f32::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ReelframeError::InvalidConfig(_)));
    }

    #[test]
    fn filter_serialises_kebab_case() {
        let json = serde_json::to_string(&ResampleFilter::CatmullRom).unwrap();
        assert_eq!(json, "\"catmull-rom\"");
    }

    #[test]
    fn config_roundtrips_through_json() {
        let c = FrameConfig::builder()
            .canvas_size(720, 1280)
            .allow_upscale(true)
            .build()
            .unwrap();
        let json = serde_json::to_string(&c).unwrap();
        let back: FrameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
