//! Device profiles and platform families.
//!
//! A device profile is a named export target with fixed pixel dimensions and
//! its own ordered screenshot set. The platform family of a profile is
//! derived from its name: anything containing "ios" (any case) is iOS,
//! everything else is Android. That one rule decides both the archive folder
//! and whether transparency is flattened, so it lives in [`is_ios_family`]
//! and nowhere else.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

/// Maximum number of screenshots per device profile.
pub const MAX_SCREENSHOTS: usize = 5;

/// Captions assigned positionally when screenshots are first attached.
pub const DEFAULT_CAPTIONS: [(&str, &str); MAX_SCREENSHOTS] = [
    ("View all events in one place", "Discover upcoming events"),
    ("View the event info", "Get all event details"),
    ("Login using ticket ID", "Quick and secure access"),
    ("Get Directions to Venue", "Navigate with ease"),
    ("Explore the event", "Experience everything"),
];

/// Store platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Top-level archive folder for this platform.
    pub fn dir(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }

    /// Whether outputs for this platform must be fully opaque.
    pub fn requires_opaque(self) -> bool {
        self == Platform::Ios
    }

    /// Classify a device profile name.
    pub fn of_device(name: &str) -> Self {
        if is_ios_family(name) {
            Platform::Ios
        } else {
            Platform::Android
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

/// True when `name` contains "ios", case-insensitively.
///
/// Deliberately a plain substring test: "Androidios" counts as iOS.
pub fn is_ios_family(name: &str) -> bool {
    name.to_lowercase().contains("ios")
}

/// Folder name for a device: lower-cased, each whitespace run replaced by one hyphen.
///
/// Leading and trailing whitespace runs become hyphens too.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;

    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
                in_space = true;
            }
        } else {
            slug.push(c);
            in_space = false;
        }
    }

    slug
}

/// A screenshot with its two caption lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Screenshot {
    pub image: Arc<RgbaImage>,
    pub caption1: String,
    pub caption2: String,
}

impl Screenshot {
    pub fn new(
        image: impl Into<Arc<RgbaImage>>,
        caption1: impl Into<String>,
        caption2: impl Into<String>,
    ) -> Self {
        Self {
            image: image.into(),
            caption1: caption1.into(),
            caption2: caption2.into(),
        }
    }

    /// Attach a screenshot at `index` with the default captions for that slot.
    pub fn with_default_captions(image: impl Into<Arc<RgbaImage>>, index: usize) -> Self {
        let (caption1, caption2) = DEFAULT_CAPTIONS
            .get(index)
            .copied()
            .unwrap_or(("", ""));
        Self::new(image, caption1, caption2)
    }
}

/// A named export target with its screenshots.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub screenshots: Vec<Screenshot>,
}

impl DeviceProfile {
    /// Create a profile with no screenshots.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            screenshots: Vec::new(),
        }
    }

    /// Replace the screenshot set, keeping at most [`MAX_SCREENSHOTS`].
    pub fn with_screenshots(mut self, mut screenshots: Vec<Screenshot>) -> Self {
        screenshots.truncate(MAX_SCREENSHOTS);
        self.screenshots = screenshots;
        self
    }

    pub fn platform(&self) -> Platform {
        Platform::of_device(&self.name)
    }

    /// Archive folder for this device, e.g. `ios/ios-pro`.
    pub fn folder(&self) -> String {
        format!("{}/{}", self.platform().dir(), slugify(&self.name))
    }
}

/// Collection of builtin device profiles.
pub struct BuiltinDevices;

impl BuiltinDevices {
    const PROFILES: [(&'static str, u32, u32); 4] = [
        ("iOS Non-Pro", 1242, 2688),
        ("iOS Pro", 1290, 2796),
        ("iOS iPad", 2048, 2732),
        ("Android Mobile", 1290, 2796),
    ];

    /// Get a builtin profile by name (case-insensitive).
    pub fn get(name: &str) -> Option<DeviceProfile> {
        Self::PROFILES
            .iter()
            .find(|(builtin, _, _)| builtin.eq_ignore_ascii_case(name.trim()))
            .map(|&(builtin, w, h)| DeviceProfile::new(builtin, w, h))
    }

    /// Get all builtin profiles, in store order.
    pub fn all() -> Vec<DeviceProfile> {
        Self::PROFILES
            .iter()
            .map(|&(name, w, h)| DeviceProfile::new(name, w, h))
            .collect()
    }
}
