//! Batch size expander.
//!
//! Turns one square source into a set of square icons. Sizes are handled one
//! at a time: each resized surface is encoded and dropped before the next is
//! made, so only the PNG bytes accumulate.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::debug;

use crate::error::{AssetError, Result};
use crate::types::icon_file_name;

use super::alpha::normalize_alpha;
use super::png::RasterArtifact;

/// Resize `source` to each size in `sizes`, in order.
///
/// Scaling is exact (`size x size`, aspect ratio not preserved). When
/// `normalize` is set, every output is alpha-normalized. Artifacts are named
/// `icon_{size}x{size}.png`.
pub fn expand_sizes(source: &RgbaImage, sizes: &[u32], normalize: bool) -> Result<Vec<RasterArtifact>> {
    if source.width() == 0 || source.height() == 0 {
        return Err(AssetError::Encode {
            path: "icons".to_string(),
            message: "source image is empty".to_string(),
        });
    }

    let mut artifacts = Vec::with_capacity(sizes.len());

    for &size in sizes {
        let name = icon_file_name(size);
        if size == 0 {
            return Err(AssetError::Encode {
                path: name,
                message: "icon size must be at least 1 pixel".to_string(),
            });
        }

        let mut surface = if source.dimensions() == (size, size) {
            source.clone()
        } else {
            imageops::resize(source, size, size, FilterType::Lanczos3)
        };

        if normalize {
            let replaced = normalize_alpha(&mut surface);
            if replaced > 0 {
                debug!(size, replaced, "Flattened transparent pixels");
            }
        }

        artifacts.push(RasterArtifact::encode(name, &surface)?);
    }

    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::alpha::is_opaque;
    use crate::types::IOS_ICON_SIZES;
    use image::Rgba;

    fn decode(artifact: &RasterArtifact) -> RgbaImage {
        image::load_from_memory(&artifact.png).unwrap().to_rgba8()
    }

    #[test]
    fn test_expand_every_ios_size() {
        let source = RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 255]));
        let artifacts = expand_sizes(&source, &IOS_ICON_SIZES, true).unwrap();

        assert_eq!(artifacts.len(), IOS_ICON_SIZES.len());
        for (artifact, &size) in artifacts.iter().zip(IOS_ICON_SIZES.iter()) {
            assert_eq!(artifact.path, format!("icon_{size}x{size}.png"));
            let img = decode(artifact);
            assert_eq!(img.dimensions(), (size, size));
            assert!(is_opaque(&img));
        }
    }

    #[test]
    fn test_expand_keeps_alpha_without_normalize() {
        let source = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 255, 100]));
        let artifacts = expand_sizes(&source, &[16], false).unwrap();

        let img = decode(&artifacts[0]);
        assert_eq!(img.get_pixel(8, 8).0[3], 100);
    }

    #[test]
    fn test_expand_normalizes_alpha() {
        let source = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 255, 100]));
        let artifacts = expand_sizes(&source, &[16], true).unwrap();

        let img = decode(&artifacts[0]);
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_non_square_source_is_stretched() {
        let source = RgbaImage::from_pixel(40, 10, Rgba([9, 9, 9, 255]));
        let artifacts = expand_sizes(&source, &[20], false).unwrap();
        assert_eq!(decode(&artifacts[0]).dimensions(), (20, 20));
    }

    #[test]
    fn test_zero_size_rejected() {
        let source = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        assert!(expand_sizes(&source, &[16, 0], false).is_err());
    }
}
