//! Project manifest (storeart.yaml) parsing and resolution.
//!
//! The manifest is the only place user configuration enters. Resolving it
//! loads every referenced image and produces the immutable request structs
//! the export pipelines take. A section whose images fail to load is recorded
//! as a failure of its own pipeline; the other sections still resolve.

mod loader;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{AssetError, Result};
use crate::export::{
    ExportInputs, IconLayout, IconsRequest, InputFailure, PipelineKind, SplashRequest,
    StoreRequest,
};
use crate::render::FontBook;
use crate::types::{
    BackgroundSpec, BuiltinDevices, DeviceProfile, Screenshot, TextStyle, DEFAULT_CAPTIONS,
    MAX_SCREENSHOTS,
};

pub use loader::{decode_data_uri, FsImageLoader, ImageLoader};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "storeart.yaml";

/// Screenshot file extensions picked up from `screenshots_dir`.
const SCREENSHOT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Project manifest loaded from storeart.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Output directory for archives.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Extra font directories.
    pub fonts: Vec<PathBuf>,

    /// Also search installed system fonts.
    #[serde(default = "default_true")]
    pub system_fonts: bool,

    pub icons: IconsSection,
    pub splash: SplashSection,
    pub store: StoreSection,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

fn default_true() -> bool {
    true
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            output: default_output(),
            fonts: vec![],
            system_fonts: true,
            icons: IconsSection::default(),
            splash: SplashSection::default(),
            store: StoreSection::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsSection {
    pub logo: Option<String>,
    pub background: Option<String>,
    pub layout: IconLayout,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashSection {
    pub logo: Option<String>,
    pub background: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub background: Option<String>,
    pub text_style: TextStyleSection,
    /// Omitted means the builtin device profiles.
    pub devices: Option<Vec<DeviceSection>>,
}

/// A YAML scalar that may be written bare (`600`) or quoted (`"600"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(u64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyleSection {
    pub font_family: Option<String>,
    pub font_weight: Option<Scalar>,
    pub color: Option<String>,
}

impl TextStyleSection {
    fn resolve(&self) -> TextStyle {
        let defaults = TextStyle::default();
        TextStyle::from_strings(
            self.font_family.as_deref().unwrap_or(&defaults.font_family),
            &self
                .font_weight
                .as_ref()
                .map(Scalar::to_string)
                .unwrap_or_else(|| defaults.font_weight.to_string()),
            self.color
                .as_deref()
                .unwrap_or(&defaults.color.to_string()),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSection {
    pub name: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub screenshots: Vec<ScreenshotSection>,
    /// Directory whose images are appended after `screenshots`, by file name.
    #[serde(default)]
    pub screenshots_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotSection {
    pub image: String,
    #[serde(default)]
    pub caption1: Option<String>,
    #[serde(default)]
    pub caption2: Option<String>,
}

impl Manifest {
    /// Load manifest from a storeart.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AssetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| AssetError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check storeart.yaml syntax".to_string()),
        })
    }

    /// Locate the manifest: an explicit path, or storeart.yaml in `dir`.
    pub fn locate(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => dir.join(MANIFEST_FILENAME),
        };

        if !path.is_file() {
            return Err(AssetError::Io {
                path,
                message: "Manifest not found".to_string(),
            });
        }
        Ok(path)
    }

    /// Resolve the manifest into pipeline inputs, loading images through `loader`.
    ///
    /// Never fails as a whole: a logo or store section that cannot be
    /// resolved leaves that pipeline empty and lists it in
    /// [`ExportInputs::failures`].
    pub fn resolve<L: ImageLoader + ?Sized>(&self, base_dir: &Path, loader: &L) -> ExportInputs {
        let icons_logo = load_optional(self.icons.logo.as_deref(), loader).map_err(|e| e.to_string());
        let splash_logo = if self.splash.logo.is_some() && self.splash.logo == self.icons.logo {
            icons_logo.clone()
        } else {
            load_optional(self.splash.logo.as_deref(), loader).map_err(|e| e.to_string())
        };
        let devices = self
            .resolve_devices(base_dir, loader)
            .map_err(|e| e.to_string());

        let mut failures = Vec::new();

        let icons = IconsRequest {
            logo: settle(PipelineKind::Icons, icons_logo, &mut failures),
            background: parse_background(self.icons.background.as_deref(), loader),
            layout: self.icons.layout,
        };

        let splash = SplashRequest {
            logo: settle(PipelineKind::Splash, splash_logo, &mut failures),
            background: parse_background(self.splash.background.as_deref(), loader),
        };

        let store = StoreRequest {
            devices: settle(PipelineKind::Store, devices, &mut failures),
            background: parse_background(self.store.background.as_deref(), loader),
            text_style: self.store.text_style.resolve(),
        };

        ExportInputs {
            icons,
            splash,
            store,
            failures,
        }
    }

    fn resolve_devices<L: ImageLoader + ?Sized>(
        &self,
        base_dir: &Path,
        loader: &L,
    ) -> Result<Vec<DeviceProfile>> {
        let Some(sections) = &self.store.devices else {
            return Ok(BuiltinDevices::all());
        };

        sections
            .iter()
            .map(|section| resolve_device(section, base_dir, loader))
            .collect()
    }

    /// Build the font book: manifest font directories, then system fonts.
    pub fn font_book(&self, base_dir: &Path) -> FontBook {
        let mut book = if self.system_fonts {
            FontBook::with_system_fonts()
        } else {
            FontBook::new()
        };

        for dir in &self.fonts {
            book.load_dir(&base_dir.join(dir));
        }
        book
    }
}

/// Unwrap a section's resolved value, or record why its pipeline cannot run.
fn settle<T: Default>(
    pipeline: PipelineKind,
    resolved: std::result::Result<T, String>,
    failures: &mut Vec<InputFailure>,
) -> T {
    match resolved {
        Ok(value) => value,
        Err(message) => {
            warn!(%pipeline, reason = %message, "Pipeline inputs could not be loaded");
            failures.push(InputFailure { pipeline, message });
            T::default()
        }
    }
}

fn load_optional<L: ImageLoader + ?Sized>(
    reference: Option<&str>,
    loader: &L,
) -> Result<Option<Arc<RgbaImage>>> {
    reference
        .map(|r| loader.load(r).map(|image| Arc::new(image.to_rgba8())))
        .transpose()
}

fn parse_background<L: ImageLoader + ?Sized>(encoded: Option<&str>, loader: &L) -> BackgroundSpec {
    encoded
        .map(|e| BackgroundSpec::parse(e, loader))
        .unwrap_or_default()
}

fn resolve_device<L: ImageLoader + ?Sized>(
    section: &DeviceSection,
    base_dir: &Path,
    loader: &L,
) -> Result<DeviceProfile> {
    let builtin = BuiltinDevices::get(&section.name);
    let width = section.width.or(builtin.as_ref().map(|d| d.width));
    let height = section.height.or(builtin.as_ref().map(|d| d.height));

    let (Some(width), Some(height)) = (width, height) else {
        return Err(AssetError::Parse {
            message: format!("Device '{}' has no dimensions", section.name),
            help: Some(
                "Set width and height, or use a builtin device name (see `storeart devices`)"
                    .to_string(),
            ),
        });
    };

    if width == 0 || height == 0 {
        return Err(AssetError::Parse {
            message: format!("Device '{}' has zero size {}x{}", section.name, width, height),
            help: None,
        });
    }

    let mut entries: Vec<(String, Option<String>, Option<String>)> = section
        .screenshots
        .iter()
        .map(|s| (s.image.clone(), s.caption1.clone(), s.caption2.clone()))
        .collect();

    if let Some(dir) = &section.screenshots_dir {
        entries.extend(
            list_screenshots(&base_dir.join(dir))
                .into_iter()
                .map(|path| path.strip_prefix(base_dir).map(Path::to_path_buf).unwrap_or(path))
                .map(|path| (path.display().to_string(), None, None)),
        );
    }

    if entries.len() > MAX_SCREENSHOTS {
        warn!(
            device = %section.name,
            found = entries.len(),
            kept = MAX_SCREENSHOTS,
            "Too many screenshots, extra ones dropped"
        );
        entries.truncate(MAX_SCREENSHOTS);
    }

    let mut screenshots = Vec::with_capacity(entries.len());
    for (index, (image, caption1, caption2)) in entries.into_iter().enumerate() {
        let decoded = Arc::new(loader.load(&image)?.to_rgba8());
        let (default1, default2) = DEFAULT_CAPTIONS[index];
        screenshots.push(Screenshot::new(
            decoded,
            caption1.unwrap_or_else(|| default1.to_string()),
            caption2.unwrap_or_else(|| default2.to_string()),
        ));
    }

    debug!(device = %section.name, width, height, screenshots = screenshots.len(), "Resolved device");
    Ok(DeviceProfile::new(section.name.clone(), width, height).with_screenshots(screenshots))
}

/// Image files directly inside `dir`, sorted by file name.
fn list_screenshots(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        warn!(path = %dir.display(), "Screenshot directory not found");
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    SCREENSHOT_EXTENSIONS
                        .iter()
                        .any(|known| known.eq_ignore_ascii_case(ext))
                })
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::encode_png;
    use crate::types::{Colour, FontWeight};
    use image::Rgba;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn write_png(path: &Path, w: u32, h: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, encode_png(&RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255]))).unwrap())
            .unwrap();
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: build").unwrap();

        assert_eq!(manifest.output, PathBuf::from("build"));
        assert!(manifest.system_fonts);
        assert!(manifest.icons.logo.is_none());
        assert!(manifest.store.devices.is_none());
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest.output, PathBuf::from("dist"));
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r##"
output: out
fonts: [fonts/]
system_fonts: false
icons:
  logo: logo.png
  background: "#ff0000"
  layout: full-bleed
store:
  text_style:
    font_family: Roboto
    font_weight: 700
    color: "#123456"
  devices:
    - name: iOS Pro
      screenshots:
        - image: shots/1.png
          caption1: A
          caption2: B
"##;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.fonts, vec![PathBuf::from("fonts/")]);
        assert!(!manifest.system_fonts);
        assert_eq!(manifest.icons.layout, IconLayout::FullBleed);
        assert_eq!(manifest.store.text_style.font_weight, Some(Scalar::Number(700)));

        let devices = manifest.store.devices.as_ref().unwrap();
        assert_eq!(devices[0].name, "iOS Pro");
        assert_eq!(devices[0].screenshots[0].caption1.as_deref(), Some("A"));
    }

    #[test]
    fn test_parse_invalid_manifest() {
        let err = Manifest::parse("icons: [not, a, map]").unwrap_err();
        assert!(matches!(err, AssetError::Parse { .. }));
    }

    #[test]
    fn test_locate_missing_manifest() {
        let dir = tempdir().unwrap();
        assert!(Manifest::locate(None, dir.path()).is_err());

        fs::write(dir.path().join(MANIFEST_FILENAME), "").unwrap();
        assert_eq!(
            Manifest::locate(None, dir.path()).unwrap(),
            dir.path().join(MANIFEST_FILENAME)
        );
    }

    #[test]
    fn test_resolve_defaults() {
        let dir = tempdir().unwrap();
        let loader = FsImageLoader::new(dir.path());

        let inputs = Manifest::default().resolve(dir.path(), &loader);

        assert!(inputs.icons.logo.is_none());
        assert_eq!(inputs.icons.background, BackgroundSpec::default());
        assert_eq!(inputs.store.devices.len(), 4);
        assert_eq!(inputs.store.screenshot_count(), 0);
        assert_eq!(inputs.store.text_style, TextStyle::default());
    }

    #[test]
    fn test_resolve_logo_and_text_style() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("logo.png"), 8, 8);

        let manifest = Manifest::parse(
            r##"
icons: { logo: logo.png, background: "linear-gradient(45deg, #ff0000, #0000ff)" }
splash: { logo: logo.png }
store:
  text_style: { font_weight: bold, color: "#ffffff" }
"##,
        )
        .unwrap();
        let inputs = manifest
            .resolve(dir.path(), &FsImageLoader::new(dir.path()));

        let icons_logo = inputs.icons.logo.unwrap();
        assert_eq!(icons_logo.dimensions(), (8, 8));
        assert!(Arc::ptr_eq(&icons_logo, inputs.splash.logo.as_ref().unwrap()));
        assert_eq!(
            inputs.icons.background,
            BackgroundSpec::LinearGradient(Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255))
        );
        assert_eq!(inputs.store.text_style.font_family, "Inter");
        assert_eq!(inputs.store.text_style.font_weight, FontWeight::BOLD);
        assert_eq!(inputs.store.text_style.color, Colour::WHITE);
    }

    #[test]
    fn test_missing_logo_blocks_icons_and_splash_only() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("shot.png"), 4, 8);
        let manifest = Manifest::parse(
            r#"
icons: { logo: missing.png }
splash: { logo: missing.png }
store: { devices: [ { name: iOS Pro, screenshots: [ { image: shot.png } ] } ] }
"#,
        )
        .unwrap();

        let inputs = manifest.resolve(dir.path(), &FsImageLoader::new(dir.path()));

        let blocked: Vec<PipelineKind> = inputs.failures.iter().map(|f| f.pipeline).collect();
        assert_eq!(blocked, vec![PipelineKind::Icons, PipelineKind::Splash]);
        assert!(inputs.failures[0].message.contains("missing.png"));
        assert!(inputs.icons.logo.is_none());
        assert!(inputs.is_ready(PipelineKind::Store));
    }

    #[test]
    fn test_missing_screenshot_blocks_store_only() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("logo.png"), 8, 8);
        let manifest = Manifest::parse(
            r#"
icons: { logo: logo.png }
splash: { logo: logo.png }
store: { devices: [ { name: iOS Pro, screenshots: [ { image: missing.png } ] } ] }
"#,
        )
        .unwrap();

        let inputs = manifest.resolve(dir.path(), &FsImageLoader::new(dir.path()));

        assert_eq!(inputs.failures.len(), 1);
        assert_eq!(inputs.failures[0].pipeline, PipelineKind::Store);
        assert!(inputs.failures[0].message.contains("missing.png"));
        assert!(inputs.is_ready(PipelineKind::Icons));
        assert!(inputs.is_ready(PipelineKind::Splash));
        assert!(!inputs.is_ready(PipelineKind::Store));
    }

    #[test]
    fn test_bad_background_image_degrades_to_white() {
        let dir = tempdir().unwrap();
        let manifest = Manifest::parse("store: { background: \"url(missing.png)\" }").unwrap();

        let inputs = manifest
            .resolve(dir.path(), &FsImageLoader::new(dir.path()));
        assert_eq!(inputs.store.background, BackgroundSpec::default());
    }

    #[test]
    fn test_unknown_device_needs_dimensions() {
        let dir = tempdir().unwrap();
        let manifest = Manifest::parse("store: { devices: [ { name: Watch } ] }").unwrap();

        let inputs = manifest.resolve(dir.path(), &FsImageLoader::new(dir.path()));
        let failure = inputs.failure(PipelineKind::Store).unwrap();
        assert!(failure.message.contains("Watch"), "{}", failure.message);
    }

    #[test]
    fn test_screenshots_dir_sorted_truncated_with_default_captions() {
        let dir = tempdir().unwrap();
        for name in ["6.png", "2.png", "1.png", "4.jpg", "3.png", "5.png"] {
            if name.ends_with(".jpg") {
                let img = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 8, Rgba([0, 0, 0, 255])));
                fs::create_dir_all(dir.path().join("shots")).unwrap();
                img.to_rgb8().save(dir.path().join("shots").join(name)).unwrap();
            } else {
                write_png(&dir.path().join("shots").join(name), 4, 8);
            }
        }
        fs::write(dir.path().join("shots/notes.txt"), "skip me").unwrap();

        let manifest = Manifest::parse(
            r#"
store:
  devices:
    - name: Tablet
      width: 100
      height: 200
      screenshots:
        - image: shots/6.png
          caption1: First
          caption2: ""
      screenshots_dir: shots
"#,
        )
        .unwrap();
        let inputs = manifest
            .resolve(dir.path(), &FsImageLoader::new(dir.path()));

        let device = &inputs.store.devices[0];
        assert_eq!((device.width, device.height), (100, 200));
        assert_eq!(device.screenshots.len(), MAX_SCREENSHOTS);

        let captions: Vec<(&str, &str)> = device
            .screenshots
            .iter()
            .map(|s| (s.caption1.as_str(), s.caption2.as_str()))
            .collect();
        assert_eq!(
            captions,
            vec![
                ("First", ""),
                DEFAULT_CAPTIONS[1],
                DEFAULT_CAPTIONS[2],
                DEFAULT_CAPTIONS[3],
                DEFAULT_CAPTIONS[4],
            ]
        );
    }

    #[test]
    fn test_builtin_device_dimensions() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 4, 8);
        let manifest = Manifest::parse(
            "store: { devices: [ { name: ios pro, screenshots: [ { image: a.png } ] } ] }",
        )
        .unwrap();

        let inputs = manifest
            .resolve(dir.path(), &FsImageLoader::new(dir.path()));
        let device = &inputs.store.devices[0];
        assert_eq!(device.name, "ios pro");
        assert_eq!((device.width, device.height), (1290, 2796));
        assert_eq!(device.folder(), "ios/ios-pro");
    }
}
