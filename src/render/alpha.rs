//! Alpha normalization.
//!
//! Some store submission slots reject any transparency. Every pixel that is
//! not fully opaque is replaced outright with opaque white; there is no
//! blending against the underlying colour.

use image::{Rgba, RgbaImage};

const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Replace every pixel with alpha < 255 by opaque white.
///
/// Returns the number of pixels replaced.
pub fn normalize_alpha(surface: &mut RgbaImage) -> usize {
    let mut replaced = 0;
    for pixel in surface.pixels_mut() {
        if pixel.0[3] < 255 {
            *pixel = OPAQUE_WHITE;
            replaced += 1;
        }
    }
    replaced
}

/// True when no pixel of the surface has alpha < 255.
pub fn is_opaque(surface: &RgbaImage) -> bool {
    surface.pixels().all(|p| p.0[3] == 255)
}
