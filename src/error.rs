//! Error types for the reelframe library.
//!
//! Every failure is fatal: the compositing transform either produces a
//! complete canvas or nothing at all. [`ReelframeError`] groups the failure
//! modes by where they originate:
//!
//! * **Input**: the path, stdin stream or URL could not be read.
//! * **Image**: the bytes are not a decodable raster image, or the decoded
//!   pixels are not 3-channel RGB.
//! * **Config**: a canvas dimension is zero. This is a configuration bug and
//!   is normally caught by [`crate::config::FrameConfigBuilder::build`] at
//!   startup rather than per request.
//! * **Output**: encoding or writing the finished canvas failed.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the reelframe library.
#[derive(Debug, Error)]
pub enum ReelframeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Image file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a readable file path, `-`, or a valid HTTP/HTTPS URL.
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Image errors ──────────────────────────────────────────────────────
    /// The bytes are not a valid or supported raster image.
    #[error("Could not decode image: {detail}")]
    Decode { detail: String },

    /// The pixel layout is not 3-channel RGB.
    ///
    /// Callers normalise to RGB before composing, so this only surfaces when
    /// a raw image is handed to the core directly.
    #[error("Unsupported channel layout: expected 3 channels (RGB), got {channels} ({color_type})")]
    Shape { channels: u8, color_type: String },

    /// Encoding the canvas to bytes failed.
    #[error("Could not encode canvas as {format}: {detail}")]
    Encode { format: String, detail: String },

    /// The requested output format cannot be written.
    #[error("Unsupported output format '{extension}'\nUse a .png or .jpg/.jpeg output path.")]
    UnsupportedOutputFormat { extension: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Canvas width or height is zero.
    #[error("Invalid canvas dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Builder validation failed for a non-dimension field.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output image file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReelframeError {
    /// Whether the error stems from bad caller input rather than a bug or
    /// environment problem. Front ends use this to pick a user-facing message.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ReelframeError::FileNotFound { .. }
                | ReelframeError::PermissionDenied { .. }
                | ReelframeError::InvalidInput { .. }
                | ReelframeError::Decode { .. }
                | ReelframeError::Shape { .. }
                | ReelframeError::UnsupportedOutputFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_display() {
        let e = ReelframeError::InvalidDimensions {
            width: 0,
            height: 1920,
        };
        let msg = e.to_string();
        assert!(msg.contains("0x1920"), "got: {msg}");
    }

    #[test]
    fn shape_display_names_channel_count() {
        let e = ReelframeError::Shape {
            channels: 4,
            color_type: "Rgba8".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("got 4"), "got: {msg}");
        assert!(msg.contains("Rgba8"));
    }

    #[test]
    fn decode_is_user_error() {
        let e = ReelframeError::Decode {
            detail: "bad magic".into(),
        };
        assert!(e.is_user_error());
        assert!(e.to_string().contains("bad magic"));
    }

    #[test]
    fn config_errors_are_not_user_errors() {
        let e = ReelframeError::InvalidDimensions {
            width: 1080,
            height: 0,
        };
        assert!(!e.is_user_error());
        assert!(!ReelframeError::Internal("boom".into()).is_user_error());
    }
}
