//! Caption text style.

use std::fmt;

use tracing::warn;

use super::Colour;

/// Fixed glyph size for caption text, in pixels.
pub const CAPTION_FONT_SIZE: f32 = 72.0;

/// A CSS-style numeric font weight (100-900).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const REGULAR: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMIBOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const EXTRA_BOLD: Self = Self(800);

    /// Parse a weight from a numeric string or a common weight name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "regular" | "normal" => Some(Self::REGULAR),
            "medium" => Some(Self::MEDIUM),
            "semibold" | "semi-bold" => Some(Self::SEMIBOLD),
            "bold" => Some(Self::BOLD),
            "extra-bold" | "extrabold" => Some(Self::EXTRA_BOLD),
            _ => s
                .parse::<u16>()
                .ok()
                .filter(|w| (100..=900).contains(w))
                .map(Self),
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Font and colour shared by every caption in a store-graphics export.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_weight: FontWeight,
    pub color: Colour,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_weight: FontWeight::SEMIBOLD,
            color: Colour::BLACK,
        }
    }
}

impl TextStyle {
    /// Build a style from loosely-typed strings.
    ///
    /// An unknown weight becomes regular (400) and an unparseable colour
    /// becomes black; both are logged, neither is an error.
    pub fn from_strings(font_family: &str, font_weight: &str, color: &str) -> Self {
        let weight = FontWeight::parse(font_weight).unwrap_or_else(|| {
            warn!(weight = font_weight, "Unknown font weight, using 400");
            FontWeight::REGULAR
        });

        let color = Colour::from_hex(color).unwrap_or_else(|_| {
            warn!(color, "Unparseable text colour, using black");
            Colour::BLACK
        });

        Self {
            font_family: font_family.trim().to_string(),
            font_weight: weight,
            color,
        }
    }
}
