//! Rendering module for storeart.
//!
//! Surfaces are plain `image::RgbaImage` buffers. A pipeline creates a fresh
//! transparent surface, paints a background, composites content on top,
//! optionally flattens transparency, and encodes the result to PNG.

mod alpha;
mod background;
mod composite;
mod png;
mod resize;
mod text;

pub use alpha::{is_opaque, normalize_alpha};
pub use background::draw_background;
pub use composite::{
    centered_logo_placement, draw_captions, draw_centered_logo, draw_screenshot,
    draw_screenshot_with_captions, screenshot_placement, Placement, FIRST_CAPTION_BASELINE,
    LOGO_SCALE, SCREENSHOT_SCALE, SECOND_CAPTION_BASELINE,
};
pub use png::{encode_png, write_png, RasterArtifact};
pub use resize::expand_sizes;
pub use text::{draw_text_centered, line_width, FontBook};

use image::RgbaImage;

use crate::types::{BackgroundSpec, Dimensions};

/// Create a transparent surface and paint `background` over it.
pub fn surface_with_background(size: Dimensions, background: &BackgroundSpec) -> RgbaImage {
    let mut surface = RgbaImage::new(size.width, size.height);
    draw_background(&mut surface, background);
    surface
}
