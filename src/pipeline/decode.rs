//! Image decoding: raw bytes (or base64 text) → opaque 8-bit RGB.
//!
//! The compositor only ever sees `RgbImage`. Everything that arrives from
//! outside goes through [`decode_rgb`], which normalises palette, grayscale
//! and alpha images to three channels. [`ensure_rgb`] is the strict variant
//! for already-decoded images: it refuses anything that is not 3-channel
//! instead of converting it.

use crate::error::ReelframeError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, RgbImage};
use std::borrow::Cow;
use tracing::debug;

/// Decode encoded image bytes (PNG, JPEG, WebP, GIF, BMP).
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ReelframeError> {
    if bytes.is_empty() {
        return Err(ReelframeError::Decode {
            detail: "input is empty".into(),
        });
    }

    let format = image::guess_format(bytes).map_err(|e| ReelframeError::Decode {
        detail: format!("unrecognised image format: {e}"),
    })?;

    let img = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        ReelframeError::Decode {
            detail: format!("{format:?}: {e}"),
        }
    })?;

    debug!(
        format = ?format,
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded image"
    );

    if img.width() == 0 || img.height() == 0 {
        return Err(ReelframeError::Decode {
            detail: "image has zero width or height".into(),
        });
    }

    Ok(img)
}

/// Decode bytes and normalise to opaque 8-bit RGB. Alpha is dropped.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, ReelframeError> {
    Ok(decode_image(bytes)?.into_rgb8())
}

/// Decode a base64 image payload into raw bytes.
///
/// Surrounding whitespace and a `data:<mime>;base64,` prefix are accepted,
/// since clients often pass data URIs straight through.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, ReelframeError> {
    let trimmed = payload.trim();
    let body = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ReelframeError::Decode {
            detail: format!("invalid base64 payload: {e}"),
        })
}

/// Borrow `img` as 8-bit RGB, refusing layouts that are not 3-channel.
///
/// 16-bit and float RGB images are converted down to 8-bit; every other
/// layout (gray, gray+alpha, RGBA) fails with [`ReelframeError::Shape`].
pub fn ensure_rgb(img: &DynamicImage) -> Result<Cow<'_, RgbImage>, ReelframeError> {
    match img {
        DynamicImage::ImageRgb8(rgb) => Ok(Cow::Borrowed(rgb)),
        other if other.color().channel_count() == 3 => Ok(Cow::Owned(other.to_rgb8())),
        other => Err(ReelframeError::Shape {
            channels: other.color().channel_count(),
            color_type: format!("{:?}", other.color()),
        }),
    }
}
