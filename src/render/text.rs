//! Caption text rendering.
//!
//! Fonts are located with `fontdb` (family + weight queries over font
//! directories and, optionally, the installed system fonts) and rasterised
//! with `fontdue`. Glyph coverage is blended source-over onto the surface.

use std::path::Path;

use fontdb::{Database, Family, Query, Stretch, Style, Weight, ID};
use fontdue::{Font, FontSettings};
use image::{Pixel, Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::types::{Colour, TextStyle};

/// Sans families tried when neither the requested family nor the generic
/// sans-serif family is installed.
const FALLBACK_FAMILIES: [&str; 5] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Roboto",
];

/// A face without this glyph (symbol and math faces) is never picked as a fallback.
const REFERENCE_GLYPH: char = 'A';

/// Font database used to resolve caption text styles.
pub struct FontBook {
    db: Database,
}

impl FontBook {
    /// Create an empty font book.
    pub fn new() -> Self {
        Self { db: Database::new() }
    }

    /// Create a font book preloaded with the installed system fonts.
    pub fn with_system_fonts() -> Self {
        let mut book = Self::new();
        book.db.load_system_fonts();
        debug!(faces = book.len(), "Loaded system fonts");
        book
    }

    /// Load every font file found (recursively) in a directory.
    pub fn load_dir(&mut self, dir: &Path) {
        if !dir.is_dir() {
            warn!(path = %dir.display(), "Font directory not found");
            return;
        }
        let before = self.len();
        self.db.load_fonts_dir(dir);
        debug!(path = %dir.display(), faces = self.len() - before, "Loaded font directory");
    }

    /// Load a single font from memory.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Number of font faces known.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Resolve a text style to a rasterisable font.
    ///
    /// Tries the requested family, then the generic sans-serif family and a
    /// few widely installed sans faces, then the first face that can draw
    /// Latin text. Returns `None` only when no usable font is known.
    pub fn resolve(&self, style: &TextStyle) -> Option<Font> {
        let mut families = vec![Family::Name(&style.font_family), Family::SansSerif];
        families.extend(FALLBACK_FAMILIES.iter().map(|name| Family::Name(name)));
        let query = Query {
            families: families.as_slice(),
            weight: Weight(style.font_weight.0),
            stretch: Stretch::Normal,
            style: Style::Normal,
        };

        let font = self
            .db
            .query(&query)
            .and_then(|id| self.load_face(id))
            .filter(covers_latin)
            .or_else(|| {
                self.db
                    .faces()
                    .filter_map(|face| self.load_face(face.id))
                    .find(covers_latin)
            })?;

        debug!(
            family = %style.font_family,
            weight = style.font_weight.0,
            resolved = font.name().unwrap_or("<unnamed>"),
            "Resolved caption font"
        );
        Some(font)
    }

    fn load_face(&self, id: ID) -> Option<Font> {
        self.db
            .with_face_data(id, |data, index| {
                Font::from_bytes(
                    data,
                    FontSettings {
                        collection_index: index,
                        ..FontSettings::default()
                    },
                )
            })?
            .map_err(|e| warn!(error = e, "Failed to parse font face"))
            .ok()
    }
}

fn covers_latin(font: &Font) -> bool {
    font.lookup_glyph_index(REFERENCE_GLYPH) != 0
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

/// A glyph positioned relative to the start of a line.
struct PlacedGlyph {
    ch: char,
    pen_x: f32,
}

/// Lay out a single line, returning glyph pen positions and the line width.
fn layout_line(font: &Font, text: &str, px: f32) -> (Vec<PlacedGlyph>, f32) {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut pen_x = 0.0;
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        if let Some(kern) = prev.and_then(|p| font.horizontal_kern(p, ch, px)) {
            pen_x += kern;
        }
        glyphs.push(PlacedGlyph { ch, pen_x });
        pen_x += font.metrics(ch, px).advance_width;
        prev = Some(ch);
    }

    (glyphs, pen_x)
}

/// Measure the advance width of a line of text.
pub fn line_width(font: &Font, text: &str, px: f32) -> f32 {
    layout_line(font, text, px).1
}

/// Draw a line of text horizontally centred on `center_x`, sitting on `baseline_y`.
pub fn draw_text_centered(
    surface: &mut RgbaImage,
    text: &str,
    center_x: f32,
    baseline_y: f32,
    font: &Font,
    px: f32,
    colour: Colour,
) {
    let (glyphs, width) = layout_line(font, text, px);
    let start_x = center_x - width / 2.0;
    let baseline = baseline_y.round() as i64;

    for glyph in glyphs {
        let (metrics, coverage) = font.rasterize(glyph.ch, px);
        if metrics.width == 0 || metrics.height == 0 {
            continue;
        }

        let left = (start_x + glyph.pen_x).round() as i64 + metrics.xmin as i64;
        let top = baseline - metrics.height as i64 - metrics.ymin as i64;

        for (i, &alpha) in coverage.iter().enumerate() {
            if alpha == 0 {
                continue;
            }
            let x = left + (i % metrics.width) as i64;
            let y = top + (i / metrics.width) as i64;
            if x < 0 || y < 0 || x >= surface.width() as i64 || y >= surface.height() as i64 {
                continue;
            }

            let a = (colour.a as u32 * alpha as u32 + 127) / 255;
            let src = Rgba([colour.r, colour.g, colour.b, a as u8]);
            surface.get_pixel_mut(x as u32, y as u32).blend(&src);
        }
    }
}
