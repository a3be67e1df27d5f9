//! Image loading at the input boundary.
//!
//! References are either `data:` URIs (base64 payload) or filesystem paths
//! relative to the project root. Everything past this point works on
//! decoded images only.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::DynamicImage;
use tracing::debug;

use crate::error::{AssetError, Result};

/// Blocking image decode capability.
pub trait ImageLoader {
    /// Load and decode the image named by `reference`.
    fn load(&self, reference: &str) -> Result<DynamicImage>;
}

/// Loads images from data URIs or from files under a base directory.
#[derive(Debug, Clone)]
pub struct FsImageLoader {
    base_dir: PathBuf,
}

impl FsImageLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a path reference against the base directory.
    pub fn resolve_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, reference: &str) -> Result<DynamicImage> {
        let bytes = if reference.starts_with("data:") {
            decode_data_uri(reference)?
        } else {
            let path = self.resolve_path(reference);
            fs::read(&path).map_err(|e| AssetError::Decode {
                reference: reference.to_string(),
                message: format!("cannot read {}: {}", path.display(), e),
            })?
        };

        let image = image::load_from_memory(&bytes).map_err(|e| AssetError::Decode {
            reference: short_reference(reference),
            message: e.to_string(),
        })?;

        debug!(
            reference = %short_reference(reference),
            width = image.width(),
            height = image.height(),
            "Decoded image"
        );
        Ok(image)
    }
}

/// Decode the payload of a `data:<mime>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let invalid = |message: &str| AssetError::Decode {
        reference: short_reference(uri),
        message: message.to_string(),
    };

    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| invalid("not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("data URI has no payload"))?;

    if !header.split(';').any(|param| param.eq_ignore_ascii_case("base64")) {
        return Err(invalid("only base64 data URIs are supported"));
    }

    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(cleaned)
        .map_err(|e| invalid(&format!("invalid base64 payload: {}", e)))
}

/// Data URIs can be megabytes long; keep log lines and errors readable.
fn short_reference(reference: &str) -> String {
    const MAX: usize = 48;
    match reference.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &reference[..cut]),
        None => reference.to_string(),
    }
}
