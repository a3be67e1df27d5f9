//! Composite renderer - places logos, screenshots and captions over a background.
//!
//! Two layout modes:
//!
//! - **Centered logo**: the logo is drawn as a square of side
//!   `0.4 * min(width, height)`, centred on both axes.
//! - **Screenshot + captions**: the screenshot is scaled to `0.8 * height`
//!   (width follows its aspect ratio), centred horizontally and anchored to
//!   the bottom edge. Two caption lines are drawn above it afterwards, so
//!   text is never hidden under the screenshot.

use fontdue::Font;
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::types::{Screenshot, TextStyle, CAPTION_FONT_SIZE};

use super::text::draw_text_centered;

/// Logo side as a fraction of the surface's shorter edge.
pub const LOGO_SCALE: f64 = 0.4;

/// Screenshot height as a fraction of the surface height.
pub const SCREENSHOT_SCALE: f64 = 0.8;

/// Baseline of the first caption line.
pub const FIRST_CAPTION_BASELINE: f32 = 80.0 + CAPTION_FONT_SIZE;

/// Baseline of the second caption line: one glyph size plus a 24 px gap lower.
pub const SECOND_CAPTION_BASELINE: f32 = FIRST_CAPTION_BASELINE + CAPTION_FONT_SIZE + 24.0;

/// An integer placement rectangle. `x`/`y` may be negative (cropped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Where the centred logo goes on a `width` x `height` surface.
pub fn centered_logo_placement(width: u32, height: u32) -> Placement {
    let side = width.min(height) as f64 * LOGO_SCALE;
    let drawn = (side.round() as u32).max(1);

    Placement {
        x: ((width as f64 - side) / 2.0).round() as i64,
        y: ((height as f64 - side) / 2.0).round() as i64,
        width: drawn,
        height: drawn,
    }
}

/// Where a `source_w` x `source_h` screenshot goes on a `width` x `height` surface.
pub fn screenshot_placement(width: u32, height: u32, source_w: u32, source_h: u32) -> Placement {
    let target_h = height as f64 * SCREENSHOT_SCALE;
    let target_w = if source_h == 0 {
        0.0
    } else {
        source_w as f64 / source_h as f64 * target_h
    };

    let drawn_w = (target_w.round() as u32).max(1);
    let drawn_h = (target_h.round() as u32).max(1);

    Placement {
        x: ((width as f64 - target_w) / 2.0).round() as i64,
        y: height as i64 - drawn_h as i64,
        width: drawn_w,
        height: drawn_h,
    }
}

/// Scale `source` to the placement's size and blend it onto the surface.
fn draw_scaled(surface: &mut RgbaImage, source: &RgbaImage, placement: Placement) {
    if source.width() == 0 || source.height() == 0 {
        return;
    }
    let scaled = imageops::resize(
        source,
        placement.width,
        placement.height,
        FilterType::Lanczos3,
    );
    imageops::overlay(surface, &scaled, placement.x, placement.y);
}

/// Draw a (square) logo centred on the surface.
///
/// The logo is stretched to a square; callers are expected to supply 1:1 logos.
pub fn draw_centered_logo(surface: &mut RgbaImage, logo: &RgbaImage) {
    let placement = centered_logo_placement(surface.width(), surface.height());
    draw_scaled(surface, logo, placement);
}

/// Draw a screenshot bottom-anchored and horizontally centred.
pub fn draw_screenshot(surface: &mut RgbaImage, screenshot: &RgbaImage) {
    let placement = screenshot_placement(
        surface.width(),
        surface.height(),
        screenshot.width(),
        screenshot.height(),
    );
    draw_scaled(surface, screenshot, placement);
}

/// Draw the two caption lines, centred horizontally.
pub fn draw_captions(
    surface: &mut RgbaImage,
    caption1: &str,
    caption2: &str,
    style: &TextStyle,
    font: &Font,
) {
    let center_x = surface.width() as f32 / 2.0;
    for (text, baseline) in [
        (caption1, FIRST_CAPTION_BASELINE),
        (caption2, SECOND_CAPTION_BASELINE),
    ] {
        draw_text_centered(
            surface,
            text,
            center_x,
            baseline,
            font,
            CAPTION_FONT_SIZE,
            style.color,
        );
    }
}

/// Screenshot + caption mode over an already-drawn background.
///
/// Without a font the captions are skipped and only the screenshot is drawn.
pub fn draw_screenshot_with_captions(
    surface: &mut RgbaImage,
    screenshot: &Screenshot,
    style: &TextStyle,
    font: Option<&Font>,
) {
    draw_screenshot(surface, &screenshot.image);
    if let Some(font) = font {
        draw_captions(surface, &screenshot.caption1, &screenshot.caption2, style, font);
    }
}
