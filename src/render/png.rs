//! PNG output for rendered surfaces.
//!
//! Every surface leaves the renderer as a [`RasterArtifact`]: lossless PNG
//! bytes plus the path the archive will file them under.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::debug;

use crate::error::{AssetError, Result};

/// A rendered surface encoded as PNG, ready for archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterArtifact {
    /// Path inside the archive, e.g. `ios/icon_16x16.png`.
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl RasterArtifact {
    /// Encode a surface and file it under `path`.
    pub fn encode(path: impl Into<String>, surface: &RgbaImage) -> Result<Self> {
        let path = path.into();
        let png = encode_png(surface).map_err(|err| match err {
            AssetError::Encode { message, .. } => AssetError::Encode {
                path: path.clone(),
                message,
            },
            other => other,
        })?;

        debug!(
            path = %path,
            width = surface.width(),
            height = surface.height(),
            bytes = png.len(),
            "Encoded artifact"
        );

        Ok(Self {
            path,
            width: surface.width(),
            height: surface.height(),
            png,
        })
    }

    /// Prefix the archive path with a folder, e.g. `ios` + `splash.png`.
    pub fn in_folder(mut self, folder: &str) -> Self {
        self.path = format!("{}/{}", folder.trim_end_matches('/'), self.path);
        self
    }
}

/// Encode a surface as an RGBA PNG.
///
/// The encoder is configured explicitly so identical pixels always produce
/// identical bytes.
pub fn encode_png(surface: &RgbaImage) -> Result<Vec<u8>> {
    let failed = |message: String| AssetError::Encode {
        path: "<surface>".to_string(),
        message,
    };

    if surface.width() == 0 || surface.height() == 0 {
        return Err(failed(format!(
            "cannot encode an empty {}x{} surface",
            surface.width(),
            surface.height()
        )));
    }

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            surface.as_raw(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| failed(e.to_string()))?;

    Ok(bytes)
}

/// Write a surface to a PNG file.
pub fn write_png(surface: &RgbaImage, path: &Path) -> Result<()> {
    surface.save(path).map_err(|e| AssetError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_encode_preserves_pixels_and_alpha() {
        let mut surface = RgbaImage::new(2, 1);
        surface.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        surface.put_pixel(1, 0, Rgba([0, 255, 0, 128]));

        let artifact = RasterArtifact::encode("test.png", &surface).unwrap();
        assert_eq!((artifact.width, artifact.height), (2, 1));

        let decoded = image::load_from_memory(&artifact.png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 255, 0, 128]);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let surface = RgbaImage::from_fn(16, 16, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 0, 255]));
        let a = encode_png(&surface).unwrap();
        let b = encode_png(&surface).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_empty_surface_fails() {
        let err = RasterArtifact::encode("empty.png", &RgbaImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, AssetError::Encode { .. }));
    }

    #[test]
    fn test_in_folder() {
        let surface = RgbaImage::new(1, 1);
        let artifact = RasterArtifact::encode("splash.png", &surface)
            .unwrap()
            .in_folder("ios/");
        assert_eq!(artifact.path, "ios/splash.png");
    }

    #[test]
    fn test_write_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");

        write_png(&RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3, 255]);
    }
}
