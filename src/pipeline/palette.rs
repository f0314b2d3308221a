//! Dominant-color extraction.
//!
//! The dominant color is the single most frequent exact RGB value in an
//! image. Ties are broken by first occurrence in row-major order, which keeps
//! the result independent of hash-map iteration order.

use image::{Rgb, RgbImage};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// An immutable RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Arithmetic mean of the three channels (0.0–255.0).
    pub fn mean(&self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    fn key(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

impl From<Rgb<u8>> for Color {
    fn from(p: Rgb<u8>) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl From<&Rgb<u8>> for Color {
    fn from(p: &Rgb<u8>) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl From<Color> for Rgb<u8> {
    fn from(c: Color) -> Self {
        c.to_rgb()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct Tally {
    count: u32,
    first_seen: usize,
    color: Color,
}

/// Most frequent exact RGB value in `img`.
///
/// Returns `None` only for an image with no pixels.
pub fn dominant_color(img: &RgbImage) -> Option<Color> {
    let mut tallies: HashMap<u32, Tally> = HashMap::new();

    for (idx, px) in img.pixels().enumerate() {
        let color = Color::from(px);
        tallies
            .entry(color.key())
            .and_modify(|t| t.count += 1)
            .or_insert(Tally {
                count: 1,
                first_seen: idx,
                color,
            });
    }

    tallies
        .into_values()
        .max_by(|a, b| {
            a.count
                .cmp(&b.count)
                .then_with(|| b.first_seen.cmp(&a.first_seen))
        })
        .map(|t| t.color)
}
