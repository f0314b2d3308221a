//! Canvas composition: center a cleaned screenshot on a solid-color canvas.
//!
//! Steps, in order:
//! 1. corner cleanup ([`crate::pipeline::corners`]), unconditional
//! 2. dominant color of the *cleaned* image becomes the background
//! 3. allocate a canvas of exactly the configured size, filled with it
//! 4. fit the image inside the canvas, preserving aspect ratio
//! 5. paste it at the floor-centered offset
//!
//! The transform is pure: same input and config, same canvas.

use crate::config::FrameConfig;
use crate::error::ReelframeError;
use crate::output::{FrameOutput, FrameStats, Placement};
use crate::pipeline::corners::clean_corners;
use crate::pipeline::decode::ensure_rgb;
use crate::pipeline::palette::dominant_color;
use image::{imageops, DynamicImage, RgbImage};
use std::borrow::Cow;
use std::time::Instant;
use tracing::{debug, info};

/// Size of a `width × height` image fitted inside a `canvas_w × canvas_h`
/// canvas with its aspect ratio preserved.
///
/// Images that already fit are returned unchanged unless `allow_upscale` is
/// set. The limiting side matches the canvas exactly; the other side is
/// rounded to the nearest pixel and never drops below 1.
pub fn fit_dimensions(
    width: u32,
    height: u32,
    canvas_w: u32,
    canvas_h: u32,
    allow_upscale: bool,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if !allow_upscale && width <= canvas_w && height <= canvas_h {
        return (width, height);
    }

    let (w, h) = (width as u64, height as u64);
    let (cw, ch) = (canvas_w as u64, canvas_h as u64);

    // cw/w <= ch/h  ⇔  cw*h <= ch*w: width is the limiting side.
    if cw * h <= ch * w {
        let scaled_h = (2 * h * cw + w) / (2 * w);
        (canvas_w, scaled_h.clamp(1, ch) as u32)
    } else {
        let scaled_w = (2 * w * ch + h) / (2 * h);
        (scaled_w.clamp(1, cw) as u32, canvas_h)
    }
}

/// Compose `img` onto a canvas described by `config`.
pub fn compose_canvas(img: &RgbImage, config: &FrameConfig) -> Result<FrameOutput, ReelframeError> {
    config.validate()?;
    let start = Instant::now();
    let (canvas_w, canvas_h) = config.canvas_size();

    if img.width() == 0 || img.height() == 0 {
        return Err(ReelframeError::Decode {
            detail: "image has zero width or height".into(),
        });
    }

    // ── Step 1: Corner cleanup ───────────────────────────────────────────
    let cleaned = clean_corners(img, config.corner_size, config.brightness_threshold);

    // ── Step 2: Background from the cleaned image ────────────────────────
    let background = dominant_color(&cleaned.image).ok_or_else(|| {
        ReelframeError::Internal("cleaned image lost its pixels".into())
    })?;

    // ── Step 3: Solid canvas ─────────────────────────────────────────────
    let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, background.to_rgb());

    // ── Step 4: Fit ──────────────────────────────────────────────────────
    let (fit_w, fit_h) = fit_dimensions(
        img.width(),
        img.height(),
        canvas_w,
        canvas_h,
        config.allow_upscale,
    );
    let resized: Cow<'_, RgbImage> = if (fit_w, fit_h) == cleaned.image.dimensions() {
        Cow::Borrowed(&cleaned.image)
    } else {
        debug!(
            from_w = img.width(),
            from_h = img.height(),
            to_w = fit_w,
            to_h = fit_h,
            filter = ?config.filter,
            "Resizing"
        );
        Cow::Owned(imageops::resize(
            &cleaned.image,
            fit_w,
            fit_h,
            config.filter.into(),
        ))
    };

    // ── Step 5: Center and paste ─────────────────────────────────────────
    let placement = Placement {
        x: (canvas_w - fit_w) / 2,
        y: (canvas_h - fit_h) / 2,
        width: fit_w,
        height: fit_h,
    };
    imageops::replace(&mut canvas, &*resized, placement.x as i64, placement.y as i64);

    let stats = FrameStats {
        source_width: img.width(),
        source_height: img.height(),
        corner_pixels_replaced: cleaned.replaced,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        source = %format!("{}x{}", img.width(), img.height()),
        canvas = %format!("{canvas_w}x{canvas_h}"),
        background = %background,
        x = placement.x,
        y = placement.y,
        width = placement.width,
        height = placement.height,
        "Canvas composed in {}ms",
        stats.duration_ms
    );

    Ok(FrameOutput {
        canvas,
        background,
        placement,
        stats,
    })
}

/// Compose a decoded image that must already be 3-channel RGB.
///
/// Fails with [`ReelframeError::Shape`] for gray or alpha images; use
/// [`crate::frame`] to normalise those first.
pub fn compose(img: &DynamicImage, config: &FrameConfig) -> Result<FrameOutput, ReelframeError> {
    let rgb = ensure_rgb(img)?;
    compose_canvas(&rgb, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::palette::Color;
    use image::{Rgb, RgbaImage};

    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    fn small_config(w: u32, h: u32) -> FrameConfig {
        FrameConfig::builder().canvas_size(w, h).build().unwrap()
    }

    #[test]
    fn fit_keeps_small_image_without_upscale() {
        assert_eq!(fit_dimensions(800, 600, 1080, 1920, false), (800, 600));
    }

    #[test]
    fn fit_upscales_when_allowed() {
        assert_eq!(fit_dimensions(800, 600, 1080, 1920, true), (1080, 810));
    }

    #[test]
    fn fit_downscales_wide_image() {
        assert_eq!(fit_dimensions(2160, 1000, 1080, 1920, false), (1080, 500));
    }

    #[test]
    fn fit_downscales_tall_image() {
        assert_eq!(fit_dimensions(1000, 3840, 1080, 1920, false), (500, 1920));
    }

    #[test]
    fn fit_exact_match() {
        assert_eq!(fit_dimensions(1080, 1920, 1080, 1920, false), (1080, 1920));
        assert_eq!(fit_dimensions(1080, 1920, 1080, 1920, true), (1080, 1920));
    }

    #[test]
    fn fit_extreme_aspect_never_collapses() {
        assert_eq!(fit_dimensions(100_000, 1, 1080, 1920, false), (1080, 1));
        assert_eq!(fit_dimensions(1, 100_000, 1080, 1920, false), (1, 1920));
    }

    #[test]
    fn scenario_uniform_blue_without_upscale() {
        let img = RgbImage::from_pixel(800, 600, BLUE);
        let out = compose_canvas(&img, &FrameConfig::default()).unwrap();
        assert_eq!(out.canvas.dimensions(), (1080, 1920));
        assert_eq!(out.background, Color::new(0, 0, 255));
        assert_eq!(
            out.placement,
            Placement {
                x: 140,
                y: 660,
                width: 800,
                height: 600
            }
        );
        assert!(out.canvas.pixels().all(|p| *p == BLUE));
    }

    #[test]
    fn scenario_uniform_blue_with_upscale() {
        let img = RgbImage::from_pixel(800, 600, BLUE);
        let config = FrameConfig::builder().allow_upscale(true).build().unwrap();
        let out = compose_canvas(&img, &config).unwrap();
        assert_eq!(
            out.placement,
            Placement {
                x: 0,
                y: 555,
                width: 1080,
                height: 810
            }
        );
    }

    #[test]
    fn odd_remainder_floors_offset() {
        let img = RgbImage::from_pixel(3, 4, BLUE);
        let out = compose_canvas(&img, &small_config(10, 9)).unwrap();
        assert_eq!((out.placement.x, out.placement.y), (3, 2));
    }

    #[test]
    fn pasted_pixels_come_from_cleaned_image() {
        // Center pixel is red and outside every corner; it must survive.
        let mut img = RgbImage::from_pixel(5, 5, Rgb([10, 10, 10]));
        img.put_pixel(2, 2, Rgb([255, 0, 0]));
        let config = FrameConfig::builder()
            .canvas_size(9, 9)
            .corner_size(2)
            .build()
            .unwrap();
        let out = compose_canvas(&img, &config).unwrap();
        assert_eq!((out.placement.x, out.placement.y), (2, 2));
        assert_eq!(*out.canvas.get_pixel(4, 4), Rgb([255, 0, 0]));
        assert_eq!(*out.canvas.get_pixel(0, 0), Rgb([10, 10, 10]));
    }

    #[test]
    fn background_uses_cleaned_image() {
        // One bright pixel per corner; each is repainted with the body gray.
        let mut img = RgbImage::from_pixel(6, 6, Rgb([50, 50, 50]));
        for (x, y) in [(0, 0), (5, 0), (0, 5), (5, 5)] {
            img.put_pixel(x, y, Rgb([250, 250, 250]));
        }
        let config = FrameConfig::builder()
            .canvas_size(8, 8)
            .corner_size(1)
            .build()
            .unwrap();
        let out = compose_canvas(&img, &config).unwrap();
        assert_eq!(out.background, Color::new(50, 50, 50));
        assert_eq!(out.stats.corner_pixels_replaced, 4);
        assert!(out.canvas.pixels().all(|p| *p == Rgb([50, 50, 50])));
    }

    #[test]
    fn zero_canvas_rejected() {
        let img = RgbImage::from_pixel(4, 4, BLUE);
        let mut config = FrameConfig::default();
        config.canvas_width = 0;
        let err = compose_canvas(&img, &config).unwrap_err();
        assert!(matches!(err, ReelframeError::InvalidDimensions { .. }));
    }

    #[test]
    fn compose_rejects_non_rgb() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        let err = compose(&img, &small_config(8, 8)).unwrap_err();
        assert!(matches!(err, ReelframeError::Shape { .. }));
    }

    #[test]
    fn deterministic() {
        let img = RgbImage::from_fn(37, 53, |x, y| Rgb([(x * 7) as u8, (y * 3) as u8, 90]));
        let config = small_config(64, 96);
        let a = compose_canvas(&img, &config).unwrap();
        let b = compose_canvas(&img, &config).unwrap();
        assert_eq!(a.canvas, b.canvas);
        assert_eq!(a.placement, b.placement);
    }
}
