//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use image::Rgba;

use crate::error::{AssetError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White. Also the fallback fill for anything that fails to parse or load.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        let digits = hex
            .chars()
            .map(parse_hex_digit)
            .collect::<Result<Vec<u8>>>()?;

        match digits.as_slice() {
            [r, g, b] => Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b)),
            [r, g, b, a] => Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::new(
                r1 << 4 | r2,
                g1 << 4 | g2,
                b1 << 4 | b2,
                a1 << 4 | a2,
            )),
            _ => Err(invalid_hex(s)),
        }
    }

    /// Find every `#RRGGBB` token in a string, in order of appearance.
    ///
    /// Used to pull gradient stops out of CSS-style `linear-gradient(...)` text,
    /// where the tokens may appear anywhere among angles and other arguments.
    pub fn scan_hex6(s: &str) -> Vec<Colour> {
        let bytes = s.as_bytes();
        let mut found = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] == b'#'
                && i + 7 <= bytes.len()
                && bytes[i + 1..i + 7].iter().all(u8::is_ascii_hexdigit)
            {
                // All six bytes are ASCII, so the slice sits on char boundaries.
                if let Ok(colour) = Colour::from_hex(&s[i + 1..i + 7]) {
                    found.push(colour);
                    i += 7;
                    continue;
                }
            }
            i += 1;
        }

        found
    }

    /// Linearly interpolate towards `other` in non-linear sRGB, alpha included.
    ///
    /// `t` is clamped to `[0, 1]`; `0` yields `self`, `1` yields `other`.
    pub fn mix(self, other: Colour, t: f32) -> Colour {
        use palette::{Mix, Srgba};

        let from: Srgba<f32> = Srgba::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        );
        let to: Srgba<f32> = Srgba::new(
            other.r as f32 / 255.0,
            other.g as f32 / 255.0,
            other.b as f32 / 255.0,
            other.a as f32 / 255.0,
        );

        let mixed = from.mix(to, t.clamp(0.0, 1.0));
        Colour::new(
            to_channel(mixed.red),
            to_channel(mixed.green),
            to_channel(mixed.blue),
            to_channel(mixed.alpha),
        )
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl From<Colour> for Rgba<u8> {
    fn from(colour: Colour) -> Self {
        Rgba(colour.to_rgba())
    }
}

impl FromStr for Colour {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn invalid_hex(s: &str) -> AssetError {
    AssetError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| AssetError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}
