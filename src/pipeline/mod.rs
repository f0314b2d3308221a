//! Pipeline stages for screenshot framing.
//!
//! Each submodule implements one step, so each can be tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ decode ──▶ corners ──▶ compose ──▶ encode
//! (path/-/URL) (RGB)   (cleanup)   (canvas)    (PNG/base64)
//! ```
//!
//! 1. [`input`]   — read a local file, stdin or an HTTP(S) URL into memory
//! 2. [`decode`]  — decode bytes and normalise to 8-bit RGB
//! 3. [`corners`] — repaint bright corner artefacts with the dominant color
//! 4. [`compose`] — fill the canvas, fit and center the cleaned image
//! 5. [`encode`]  — serialise the canvas as PNG (or JPEG) bytes or base64
//!
//! [`palette`] holds the dominant-color computation shared by steps 3 and 4.

pub mod compose;
pub mod corners;
pub mod decode;
pub mod encode;
pub mod input;
pub mod palette;
