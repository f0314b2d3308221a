//! Canvas encoding: `RgbImage` → PNG/JPEG bytes or base64 PNG text.
//!
//! PNG is the default everywhere. Canvases are mostly a flat fill plus a
//! screenshot full of text, which PNG compresses well and keeps sharp.
//! JPEG is only used when a caller explicitly asks for a `.jpg` output file.

use crate::error::ReelframeError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// JPEG quality used for `.jpg` outputs.
pub const JPEG_QUALITY: u8 = 92;

/// Encode the canvas as PNG.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, ReelframeError> {
    encode(img, ImageFormat::Png)
}

/// Encode the canvas as a base64 PNG string.
pub fn encode_base64_png(img: &RgbImage) -> Result<String, ReelframeError> {
    let png = encode_png(img)?;
    let b64 = STANDARD.encode(&png);
    debug!("Encoded canvas → {} bytes base64", b64.len());
    Ok(b64)
}

/// Encode the canvas in `format`. Only PNG and JPEG are written.
pub fn encode(img: &RgbImage, format: ImageFormat) -> Result<Vec<u8>, ReelframeError> {
    let mut buf = Vec::new();
    let result = match format {
        ImageFormat::Png => img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png),
        ImageFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY).encode_image(img)
        }
        other => {
            return Err(ReelframeError::UnsupportedOutputFormat {
                extension: format!("{other:?}").to_lowercase(),
            })
        }
    };
    result.map_err(|e| ReelframeError::Encode {
        format: format!("{format:?}"),
        detail: e.to_string(),
    })?;

    debug!(
        format = ?format,
        width = img.width(),
        height = img.height(),
        bytes = buf.len(),
        "Encoded canvas"
    );
    Ok(buf)
}

/// Pick the output format from a file extension. No extension means PNG.
pub fn format_for_path(path: &Path) -> Result<ImageFormat, ReelframeError> {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Ok(ImageFormat::Png);
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        other => Err(ReelframeError::UnsupportedOutputFormat {
            extension: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn encode_small_canvas_png() {
        let img = RgbImage::from_pixel(10, 10, Rgb([255, 0, 0]));
        let png = encode_png(&img).expect("encode should succeed");
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn base64_png_decodes_to_png() {
        let img = RgbImage::from_pixel(3, 5, Rgb([0, 128, 0]));
        let b64 = encode_base64_png(&img).unwrap();
        let decoded = STANDARD.decode(&b64).expect("valid base64");
        let back = image::load_from_memory(&decoded).unwrap();
        assert_eq!((back.width(), back.height()), (3, 5));
        assert_eq!(back.color().channel_count(), 3);
    }

    #[test]
    fn jpeg_output() {
        let img = RgbImage::from_pixel(8, 8, Rgb([10, 200, 30]));
        let jpg = encode(&img, ImageFormat::Jpeg).unwrap();
        assert_eq!(&jpg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn unsupported_format_rejected() {
        let img = RgbImage::new(2, 2);
        let err = encode(&img, ImageFormat::Tiff).unwrap_err();
        assert!(matches!(err, ReelframeError::UnsupportedOutputFormat { .. }));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(format_for_path(Path::new("out.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(format_for_path(Path::new("out.jpeg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("out")).unwrap(), ImageFormat::Png);
        assert!(format_for_path(Path::new("out.gif")).is_err());
    }
}
