//! Entry points that move bytes in and out of the compositor.
//!
//! [`frame`] is the core boundary: decoded image in, canvas out. The other
//! functions wrap it for the ways callers actually hold images: raw bytes
//! from an upload, a base64 string from a tool call, a path or URL from the
//! command line.

use crate::config::FrameConfig;
use crate::error::ReelframeError;
use crate::output::{FrameOutput, FrameSummary, ImageInfo};
use crate::pipeline::{compose, decode, encode, input, palette};
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, info};

/// Frame a decoded image onto a canvas.
///
/// The image is normalised to opaque RGB first (alpha dropped, gray
/// expanded), so unlike [`compose::compose`] this never fails with
/// [`ReelframeError::Shape`].
pub fn frame(img: &DynamicImage, config: &FrameConfig) -> Result<FrameOutput, ReelframeError> {
    match img {
        DynamicImage::ImageRgb8(rgb) => compose::compose_canvas(rgb, config),
        other => {
            debug!(color = ?other.color(), "Normalising to RGB");
            compose::compose_canvas(&other.to_rgb8(), config)
        }
    }
}

/// Decode encoded image bytes, frame them and return PNG bytes.
pub fn frame_bytes(bytes: &[u8], config: &FrameConfig) -> Result<Vec<u8>, ReelframeError> {
    let rgb = decode::decode_rgb(bytes)?;
    compose::compose_canvas(&rgb, config)?.to_png_bytes()
}

/// Base64 image in, base64 PNG canvas out.
///
/// This is the shape a tool-invocation host expects: text in, text out.
pub fn frame_base64(payload: &str, config: &FrameConfig) -> Result<String, ReelframeError> {
    let bytes = decode::decode_base64(payload)?;
    let rgb = decode::decode_rgb(&bytes)?;
    compose::compose_canvas(&rgb, config)?.to_base64_png()
}

/// Frame an image on the blocking thread pool.
///
/// Composition is CPU-bound (a Lanczos resize of a full screenshot), so
/// async hosts should call this rather than [`frame`] directly to keep their
/// worker threads responsive.
pub async fn frame_async(
    img: DynamicImage,
    config: FrameConfig,
) -> Result<FrameOutput, ReelframeError> {
    tokio::task::spawn_blocking(move || frame(&img, &config))
        .await
        .map_err(|e| ReelframeError::Internal(format!("Compose task panicked: {e}")))?
}

/// Resolve `input` (path, `-` or URL), decode it and frame it.
pub async fn frame_input(
    input_str: impl AsRef<str>,
    config: &FrameConfig,
) -> Result<FrameOutput, ReelframeError> {
    let input_str = input_str.as_ref();
    info!("Framing: {}", input_str);

    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    let img = decode::decode_image(&resolved.bytes)?;
    frame_async(img, config.clone()).await
}

/// Frame `input` and write the canvas to `output_path`.
///
/// The format follows the extension (`.png`, `.jpg`/`.jpeg`; none means PNG).
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn frame_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &FrameConfig,
) -> Result<FrameSummary, ReelframeError> {
    let path = output_path.as_ref();
    // Reject unsupported extensions before doing any work.
    let format = encode::format_for_path(path)?;

    let output = frame_input(input_str, config).await?;
    let bytes = encode::encode(&output.canvas, format)?;
    write_atomic(path, &bytes).await?;

    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(output.summary())
}

/// Decode `input` and report its size, layout and raw dominant color.
///
/// Does no cleanup or composition.
pub async fn inspect(input_str: impl AsRef<str>) -> Result<ImageInfo, ReelframeError> {
    let resolved = input::resolve_input(input_str.as_ref(), 120).await?;
    let img = decode::decode_image(&resolved.bytes)?;
    let color_type = format!("{:?}", img.color());
    let rgb = img.into_rgb8();
    let dominant_color = palette::dominant_color(&rgb).ok_or_else(|| ReelframeError::Decode {
        detail: "image has zero width or height".into(),
    })?;

    Ok(ImageInfo {
        width: rgb.width(),
        height: rgb.height(),
        color_type,
        dominant_color,
    })
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ReelframeError> {
    let write_err = |source| ReelframeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, bytes).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)
}
