//! Background specifications.
//!
//! Backgrounds arrive as compact CSS-like strings:
//!
//! ```text
//! #1a2b3c                                  solid colour
//! linear-gradient(45deg, #ff0000, #0000ff) diagonal two-stop gradient
//! url(data:image/png;base64,....)          image, cover-fit to the bottom edge
//! ```
//!
//! The string is classified once at the input boundary into a typed
//! [`BackgroundSpec`]. Anything malformed degrades to solid white rather
//! than failing.

use std::sync::Arc;

use image::RgbaImage;
use tracing::warn;

use crate::manifest::ImageLoader;

use super::Colour;

/// What to paint behind composited content.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundSpec {
    /// Flat fill.
    SolidColor(Colour),
    /// Diagonal gradient from the top-left corner (first stop) to the
    /// bottom-right corner (second stop).
    LinearGradient(Colour, Colour),
    /// Decoded image drawn with a bottom-anchored cover fit.
    ImageFill(Arc<RgbaImage>),
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        BackgroundSpec::SolidColor(Colour::WHITE)
    }
}

/// Syntactic classification of an encoded background string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedBackground<'a> {
    Solid(Colour),
    Gradient(Colour, Colour),
    /// The payload wrapped by `url(...)`, not yet loaded.
    Image(&'a str),
    /// Unusable input; carries the reason for the warning.
    Invalid(String),
}

impl<'a> EncodedBackground<'a> {
    /// Classify an encoded background string without loading anything.
    pub fn classify(encoded: &'a str) -> Self {
        let trimmed = encoded.trim();

        if trimmed.starts_with("linear-gradient") {
            let stops = Colour::scan_hex6(trimmed);
            return match stops.as_slice() {
                [first, second, ..] => EncodedBackground::Gradient(*first, *second),
                _ => EncodedBackground::Invalid(format!(
                    "gradient '{}' needs two #rrggbb colours, found {}",
                    trimmed,
                    stops.len()
                )),
            };
        }

        if let Some(payload) = trimmed
            .strip_prefix("url(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return EncodedBackground::Image(payload);
        }

        match Colour::from_hex(trimmed) {
            Ok(colour) => EncodedBackground::Solid(colour),
            Err(_) => EncodedBackground::Invalid(format!("'{}' is not a hex colour", trimmed)),
        }
    }
}

impl BackgroundSpec {
    /// Parse an encoded background, loading image payloads through `loader`.
    ///
    /// Never fails: malformed gradients, unparseable colours and images that
    /// cannot be loaded all become a white fill, with a warning logged.
    pub fn parse<L: ImageLoader + ?Sized>(encoded: &str, loader: &L) -> Self {
        match EncodedBackground::classify(encoded) {
            EncodedBackground::Solid(colour) => BackgroundSpec::SolidColor(colour),
            EncodedBackground::Gradient(from, to) => BackgroundSpec::LinearGradient(from, to),
            EncodedBackground::Image(payload) => match loader.load(payload) {
                Ok(image) => BackgroundSpec::ImageFill(Arc::new(image.to_rgba8())),
                Err(err) => {
                    warn!(error = %err, "Failed to load background image, using white");
                    BackgroundSpec::default()
                }
            },
            EncodedBackground::Invalid(reason) => {
                warn!(%reason, "Unusable background, using white");
                BackgroundSpec::default()
            }
        }
    }

    /// Render the spec back into its encoded string form.
    ///
    /// Image fills have no source reference left to encode and return `None`.
    pub fn encode(&self) -> Option<String> {
        match self {
            BackgroundSpec::SolidColor(colour) => Some(colour.to_string()),
            BackgroundSpec::LinearGradient(from, to) => {
                Some(format!("linear-gradient(45deg, {}, {})", from, to))
            }
            BackgroundSpec::ImageFill(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AssetError, Result};
    use image::DynamicImage;

    struct FixedLoader(Option<RgbaImage>);

    impl ImageLoader for FixedLoader {
        fn load(&self, reference: &str) -> Result<DynamicImage> {
            self.0
                .clone()
                .map(DynamicImage::ImageRgba8)
                .ok_or_else(|| AssetError::Decode {
                    reference: reference.to_string(),
                    message: "missing".to_string(),
                })
        }
    }

    #[test]
    fn test_classify_solid() {
        assert_eq!(
            EncodedBackground::classify("#1a2b3c"),
            EncodedBackground::Solid(Colour::rgb(0x1a, 0x2b, 0x3c))
        );
    }

    #[test]
    fn test_classify_gradient_uses_first_two_stops() {
        assert_eq!(
            EncodedBackground::classify("linear-gradient(45deg, #ff0000, #0000ff, #00ff00)"),
            EncodedBackground::Gradient(Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255))
        );
    }

    #[test]
    fn test_classify_gradient_with_one_stop_is_invalid() {
        assert!(matches!(
            EncodedBackground::classify("linear-gradient(45deg, #ff0000)"),
            EncodedBackground::Invalid(_)
        ));
        assert!(matches!(
            EncodedBackground::classify("linear-gradient(45deg, red, blue)"),
            EncodedBackground::Invalid(_)
        ));
    }

    #[test]
    fn test_classify_url() {
        assert_eq!(
            EncodedBackground::classify("url(art/bg.png)"),
            EncodedBackground::Image("art/bg.png")
        );
        // Missing closing parenthesis is not a url
        assert!(matches!(
            EncodedBackground::classify("url(art/bg.png"),
            EncodedBackground::Invalid(_)
        ));
    }

    #[test]
    fn test_parse_invalid_defaults_to_white() {
        let loader = FixedLoader(None);
        assert_eq!(
            BackgroundSpec::parse("papayawhip", &loader),
            BackgroundSpec::SolidColor(Colour::WHITE)
        );
        assert_eq!(
            BackgroundSpec::parse("linear-gradient(#ff0000)", &loader),
            BackgroundSpec::SolidColor(Colour::WHITE)
        );
    }

    #[test]
    fn test_parse_failed_image_defaults_to_white() {
        let loader = FixedLoader(None);
        assert_eq!(
            BackgroundSpec::parse("url(missing.png)", &loader),
            BackgroundSpec::SolidColor(Colour::WHITE)
        );
    }

    #[test]
    fn test_parse_loaded_image() {
        let image = RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 255]));
        let loader = FixedLoader(Some(image.clone()));

        match BackgroundSpec::parse("url(bg.png)", &loader) {
            BackgroundSpec::ImageFill(loaded) => assert_eq!(*loaded, image),
            other => panic!("expected image fill, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_round_trips_through_classify() {
        let spec = BackgroundSpec::LinearGradient(Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255));
        let encoded = spec.encode().unwrap();
        assert_eq!(encoded, "linear-gradient(45deg, #ff0000, #0000ff)");
        assert_eq!(
            EncodedBackground::classify(&encoded),
            EncodedBackground::Gradient(Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255))
        );
    }
}
