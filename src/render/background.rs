//! Background renderer.
//!
//! Paints a [`BackgroundSpec`] over the full surface. Solid and gradient
//! fills replace whatever was there; image fills are composited over it.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::types::{BackgroundSpec, Colour};

/// Draw a background over the whole surface.
pub fn draw_background(surface: &mut RgbaImage, spec: &BackgroundSpec) {
    match spec {
        BackgroundSpec::SolidColor(colour) => fill_solid(surface, *colour),
        BackgroundSpec::LinearGradient(from, to) => fill_gradient(surface, *from, *to),
        BackgroundSpec::ImageFill(image) => fill_image_cover(surface, image),
    }
}

fn fill_solid(surface: &mut RgbaImage, colour: Colour) {
    let src: Rgba<u8> = colour.into();
    for pixel in surface.pixels_mut() {
        *pixel = src;
    }
}

/// Diagonal gradient along the axis (0, 0) -> (width, height).
///
/// Each pixel centre is projected onto the axis to find its position `t`.
fn fill_gradient(surface: &mut RgbaImage, from: Colour, to: Colour) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let axis_len_sq = w * w + h * h;
    if axis_len_sq == 0.0 {
        return;
    }

    for (x, y, pixel) in surface.enumerate_pixels_mut() {
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;
        let t = ((px * w + py * h) / axis_len_sq) as f32;
        *pixel = from.mix(to, t).into();
    }
}

/// Cover fit anchored to the bottom edge.
///
/// The image is scaled by `max(w / iw, h / ih)`, centred horizontally and
/// aligned so its bottom row lands on the surface's bottom row. Whatever
/// overflows the top (or the sides) is cropped.
fn fill_image_cover(surface: &mut RgbaImage, image: &RgbaImage) {
    let (w, h) = surface.dimensions();
    let (iw, ih) = image.dimensions();
    if iw == 0 || ih == 0 || w == 0 || h == 0 {
        return;
    }

    let scale = (w as f64 / iw as f64).max(h as f64 / ih as f64);
    let scaled_w = ((iw as f64 * scale).round() as u32).max(1);
    let scaled_h = ((ih as f64 * scale).round() as u32).max(1);

    let scaled = imageops::resize(image, scaled_w, scaled_h, FilterType::Lanczos3);

    let x = ((w as f64 - scaled_w as f64) / 2.0).round() as i64;
    let y = h as i64 - scaled_h as i64;
    imageops::overlay(surface, &scaled, x, y);
}
