//! Input resolution: turn a user-supplied path, `-` or URL into image bytes.
//!
//! Everything is read fully into memory; screenshots are small and the
//! decoder needs the whole buffer anyway. Nothing is written to disk.

use crate::error::ReelframeError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Where the input bytes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Local(PathBuf),
    Stdin,
    Url(String),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Local(p) => write!(f, "{}", p.display()),
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::Url(u) => f.write_str(u),
        }
    }
}

/// The resolved input: its origin plus the raw bytes.
#[derive(Debug)]
pub struct ResolvedInput {
    pub source: InputSource,
    pub bytes: Vec<u8>,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Classify the input string without touching the file system or network.
pub fn classify(input: &str) -> Result<InputSource, ReelframeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReelframeError::InvalidInput {
            input: input.to_string(),
            reason: "empty input; pass a file path, '-' for stdin, or an HTTP/HTTPS URL".into(),
        });
    }
    if trimmed == "-" {
        Ok(InputSource::Stdin)
    } else if is_url(trimmed) {
        Ok(InputSource::Url(trimmed.to_string()))
    } else {
        Ok(InputSource::Local(PathBuf::from(trimmed)))
    }
}

/// Resolve the input string to image bytes.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<ResolvedInput, ReelframeError> {
    let source = classify(input)?;
    let bytes = match &source {
        InputSource::Local(path) => read_local(path).await?,
        InputSource::Stdin => read_stdin().await?,
        InputSource::Url(url) => download_url(url, timeout_secs).await?,
    };

    if bytes.is_empty() {
        return Err(ReelframeError::InvalidInput {
            input: source.to_string(),
            reason: "input is empty".into(),
        });
    }

    debug!("Resolved {} ({} bytes)", source, bytes.len());
    Ok(ResolvedInput { source, bytes })
}

async fn read_local(path: &Path) -> Result<Vec<u8>, ReelframeError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ReelframeError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ReelframeError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ReelframeError::InvalidInput {
            input: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

async fn read_stdin() -> Result<Vec<u8>, ReelframeError> {
    let mut buf = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut buf)
        .await
        .map_err(|e| ReelframeError::InvalidInput {
            input: "-".into(),
            reason: format!("failed to read stdin: {e}"),
        })?;
    Ok(buf)
}

/// Download a URL into memory.
async fn download_url(url: &str, timeout_secs: u64) -> Result<Vec<u8>, ReelframeError> {
    info!("Downloading image from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ReelframeError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            ReelframeError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            ReelframeError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(ReelframeError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ReelframeError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    info!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}
