//! CLI binary for reelframe.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `FrameConfig` and writes the finished canvas.

use anyhow::{bail, Context, Result};
use clap::Parser;
use reelframe::pipeline::input::resolve_input;
use reelframe::{frame_base64, frame_input, frame_to_file, inspect, FrameConfig, ResampleFilter};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Frame a screenshot for a 1080x1920 reel
  reelframe screenshot.png -o reel_ready_image.png

  # Pipe bytes through
  cat screenshot.jpg | reelframe - > reel.png

  # Smaller canvas, upscale small screenshots to fill it
  reelframe --width 720 --height 1280 --allow-upscale shot.png -o reel.png

  # Only repaint glare and white rounded corners
  reelframe --brightness-threshold 200 shot.png -o reel.png

  # Base64 in, base64 PNG out (tool integrations)
  reelframe --base64 shot.b64 > reel.b64

  # JSON summary of placement and background color
  reelframe --json shot.png -o reel.png

  # Inspect an image without framing it
  reelframe --inspect-only https://example.com/shot.png

ENVIRONMENT VARIABLES:
  RUST_LOG                 Override log filter (e.g. reelframe=debug)
  REELFRAME_WIDTH          Canvas width
  REELFRAME_HEIGHT         Canvas height
  REELFRAME_CORNER_SIZE    Corner cleanup square size
  REELFRAME_BRIGHTNESS     Corner brightness threshold
"#;

/// Frame screenshots onto vertical canvases with a matching background.
#[derive(Parser, Debug)]
#[command(
    name = "reelframe",
    version,
    about = "Frame screenshots onto vertical canvases with a matching background",
    long_about = "Center a screenshot on a fixed-size vertical canvas (1080x1920 by default) \
filled with the screenshot's own dominant color. Bright artefacts in the image corners are \
cleaned first so they do not skew the background color.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local image path, '-' for stdin, or HTTP/HTTPS URL.
    input: String,

    /// Write the canvas to this file (.png or .jpg) instead of stdout.
    #[arg(short, long, env = "REELFRAME_OUTPUT")]
    output: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, env = "REELFRAME_WIDTH", default_value_t = 1080,
          value_parser = clap::value_parser!(u32).range(1..=16_384))]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, env = "REELFRAME_HEIGHT", default_value_t = 1920,
          value_parser = clap::value_parser!(u32).range(1..=16_384))]
    height: u32,

    /// Side length of the square cleaned at each image corner (0 disables).
    #[arg(long, env = "REELFRAME_CORNER_SIZE", default_value_t = 50)]
    corner_size: u32,

    /// Corner pixels whose channel mean exceeds this are repainted (0–255).
    #[arg(
        long,
        env = "REELFRAME_BRIGHTNESS",
        default_value_t = 1.0,
        long_help = "Corner pixels whose mean channel value is strictly greater than this are \
          repainted with the dominant color. The default of 1 repaints everything that is not \
          near-black; use ~200 to only remove glare and white rounded corners."
    )]
    brightness_threshold: f32,

    /// Scale screenshots smaller than the canvas up to fill it.
    #[arg(long, env = "REELFRAME_ALLOW_UPSCALE")]
    allow_upscale: bool,

    /// Resampling filter used when resizing.
    #[arg(long, env = "REELFRAME_FILTER", value_enum, default_value = "lanczos3")]
    filter: FilterArg,

    /// Treat the input as base64 text and print the canvas as base64 PNG.
    #[arg(long, conflicts_with = "inspect_only")]
    base64: bool,

    /// Print JSON (summary with -o, image info with --inspect-only) to stdout.
    #[arg(long)]
    json: bool,

    /// Print image size and dominant color only, no framing.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "REELFRAME_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "REELFRAME_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "REELFRAME_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<FilterArg> for ResampleFilter {
    fn from(v: FilterArg) -> Self {
        match v {
            FilterArg::Nearest => ResampleFilter::Nearest,
            FilterArg::Triangle => ResampleFilter::Triangle,
            FilterArg::CatmullRom => ResampleFilter::CatmullRom,
            FilterArg::Gaussian => ResampleFilter::Gaussian,
            FilterArg::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let info = inspect(&cli.input).await.context("Failed to inspect image")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialize image info")?
            );
        } else {
            println!("Input:        {}", cli.input);
            println!("Size:         {}x{}", info.width, info.height);
            println!("Pixel format: {}", info.color_type);
            println!("Dominant:     {}", info.dominant_color);
        }
        return Ok(());
    }

    // Invalid sizes are a startup error, not a per-image one.
    let config = build_config(&cli)?;

    // ── Base64 mode ──────────────────────────────────────────────────────
    if cli.base64 {
        let resolved = resolve_input(&cli.input, config.download_timeout_secs)
            .await
            .context("Failed to read input")?;
        let payload =
            String::from_utf8(resolved.bytes).context("Base64 input is not valid UTF-8 text")?;
        let encoded = tokio::task::spawn_blocking(move || frame_base64(&payload, &config))
            .await
            .context("Framing task panicked")?
            .context("Framing failed")?;

        match cli.output {
            Some(ref path) => tokio::fs::write(path, encoded.as_bytes())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => println!("{encoded}"),
        }
        return Ok(());
    }

    // ── File output ──────────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let summary = frame_to_file(&cli.input, output_path, &config)
            .await
            .context("Framing failed")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
            );
        } else if !cli.quiet {
            eprintln!(
                "{}  {}x{} → {}x{} at ({}, {})  background {}  {}ms  →  {}",
                green("✔"),
                summary.stats.source_width,
                summary.stats.source_height,
                summary.placement.width,
                summary.placement.height,
                summary.placement.x,
                summary.placement.y,
                bold(&summary.background.to_string()),
                dim(&summary.stats.duration_ms.to_string()),
                bold(&output_path.display().to_string()),
            );
        }
        return Ok(());
    }

    // ── Stdout output ────────────────────────────────────────────────────
    if cli.json {
        bail!("--json needs -o <FILE>: stdout already carries the PNG");
    }
    let stdout = io::stdout();
    if stdout.is_terminal() {
        bail!("Refusing to write binary PNG to a terminal; use -o <FILE> or redirect stdout");
    }

    let output = frame_input(&cli.input, &config)
        .await
        .context("Framing failed")?;
    let png = output.to_png_bytes().context("Failed to encode PNG")?;

    let mut handle = stdout.lock();
    handle
        .write_all(&png)
        .context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    if !cli.quiet {
        eprintln!(
            "{} {}x{} canvas, background {}",
            green("✔"),
            output.canvas.width(),
            output.canvas.height(),
            bold(&output.background.to_string()),
        );
    }

    Ok(())
}

/// Map CLI args to `FrameConfig`.
fn build_config(cli: &Cli) -> Result<FrameConfig> {
    FrameConfig::builder()
        .canvas_size(cli.width, cli.height)
        .corner_size(cli.corner_size)
        .brightness_threshold(cli.brightness_threshold)
        .allow_upscale(cli.allow_upscale)
        .filter(cli.filter.clone().into())
        .download_timeout_secs(cli.download_timeout)
        .build()
        .context("Invalid configuration")
}
