//! # reelframe
//!
//! Turn an arbitrary screenshot into a fixed-size vertical canvas
//! (1080×1920 by default) for short-form video, padded with a background
//! color sampled from the screenshot itself so the result looks framed on
//! purpose rather than letterboxed.
//!
//! ## Pipeline Overview
//!
//! ```text
//! screenshot
//!  │
//!  ├─ 1. Input    local file, stdin or HTTP/HTTPS URL → bytes
//!  ├─ 2. Decode   PNG/JPEG/WebP/GIF/BMP → 8-bit RGB
//!  ├─ 3. Corners  repaint bright corner artefacts with the dominant color
//!  ├─ 4. Compose  fill canvas with the cleaned image's dominant color,
//!  │              fit (aspect-preserving, Lanczos3) and center
//!  └─ 5. Encode   PNG bytes, base64 PNG, or JPEG file
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reelframe::{frame_bytes, FrameConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FrameConfig::default();
//!     let screenshot = std::fs::read("screenshot.png")?;
//!     let png = frame_bytes(&screenshot, &config)?;
//!     std::fs::write("reel_ready_image.png", png)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `reelframe` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! reelframe = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{FrameConfig, FrameConfigBuilder, ResampleFilter};
pub use convert::{frame, frame_async, frame_base64, frame_bytes, frame_input, frame_to_file, inspect};
pub use error::ReelframeError;
pub use output::{FrameOutput, FrameStats, FrameSummary, ImageInfo, Placement};
pub use pipeline::compose::{compose, compose_canvas, fit_dimensions};
pub use pipeline::corners::{clean, clean_corners, CleanedImage, Corner, CornerRegion};
pub use pipeline::palette::{dominant_color, Color};
