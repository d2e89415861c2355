use std::fmt;

use crate::foundation::error::{GlyphFxError, GlyphFxResult};

pub use kurbo::{Affine, Point, Vec2};

/// Half-open range `[start, end)` of character slots.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CharRange {
    /// First slot in the range.
    pub start: usize,
    /// One past the last slot.
    pub end: usize, // exclusive
}

impl CharRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: usize, end: usize) -> GlyphFxResult<Self> {
        if start > end {
            return Err(GlyphFxError::document("CharRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of slots covered.
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when no slot is covered.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// True when `index` lies in `[start, end)`.
    pub fn contains(self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// True when the range fits inside `0..char_count`.
    pub fn fits(self, char_count: usize) -> bool {
        self.start <= self.end && self.end <= char_count
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Straight (non-premultiplied) RGBA color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// White with zero alpha; the reset value of color state.
    pub const TRANSPARENT_WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 0.0);

    /// Build a color from its channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional, hex digits case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err("hex color must be ASCII".to_owned());
        }

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        let (r, g, b, a) = match s.len() {
            6 => (
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                255,
            ),
            8 => (
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            ),
            _ => {
                return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
            }
        };

        Ok(Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        ))
    }

    /// Format as lowercase `#rrggbbaa`, channels rounded to 8 bits.
    pub fn to_hex(&self) -> String {
        fn byte(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }
}

/// Serde adapter storing an optional [`Rgba`] as a hex string.
pub(crate) mod hex_color {
    use super::Rgba;

    pub(crate) fn serialize<S>(value: &Option<Rgba>, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match value {
            Some(c) => s.serialize_some(&c.to_hex()),
            None => s.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(d: D) -> Result<Option<Rgba>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Option<String> = serde::Deserialize::deserialize(d)?;
        raw.map(|s| Rgba::from_hex(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
