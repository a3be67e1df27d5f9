//! Export pipelines.
//!
//! Each pipeline takes an explicit, immutable request, checks its
//! precondition, renders every surface in a fixed order and hands the PNG
//! artifacts to an [`ArchiveBuilder`]. Nothing here reads the manifest, the
//! environment or any global state.

mod archive;
mod bundle;
mod icons;
mod splash;
mod store;

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::types::{BackgroundSpec, DeviceProfile, TextStyle};

pub use archive::{Archive, ArchiveBuilder};
pub use bundle::{bundle_all_assets, qualifying_pipelines, run_pipeline, ALL_ASSETS_ARCHIVE};
pub use icons::{compose_icon_master, generate_app_icons};
pub use splash::generate_splash_screens;
pub use store::generate_store_graphics;

/// The three archive-producing pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    Icons,
    Splash,
    Store,
}

impl PipelineKind {
    /// All pipelines, in bundling order.
    pub const ALL: [PipelineKind; 3] = [PipelineKind::Icons, PipelineKind::Splash, PipelineKind::Store];

    /// File name of the archive this pipeline produces.
    pub fn archive_name(self) -> &'static str {
        match self {
            PipelineKind::Icons => "app-icons.zip",
            PipelineKind::Splash => "splash-screens.zip",
            PipelineKind::Store => "store-graphics.zip",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PipelineKind::Icons => "app icons",
            PipelineKind::Splash => "splash screens",
            PipelineKind::Store => "store graphics",
        })
    }
}

/// How the iOS icon set is derived from the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconLayout {
    /// Logo at 40% over the background on a 1024 master, then resized.
    #[default]
    Centered,
    /// The raw logo resized to every size.
    FullBleed,
}

/// Inputs for the app icon pipeline.
#[derive(Debug, Clone, Default)]
pub struct IconsRequest {
    pub logo: Option<Arc<RgbaImage>>,
    pub background: BackgroundSpec,
    pub layout: IconLayout,
}

/// Inputs for the splash screen pipeline.
#[derive(Debug, Clone, Default)]
pub struct SplashRequest {
    pub logo: Option<Arc<RgbaImage>>,
    pub background: BackgroundSpec,
}

/// Inputs for the store graphics pipeline.
#[derive(Debug, Clone, Default)]
pub struct StoreRequest {
    pub devices: Vec<DeviceProfile>,
    pub background: BackgroundSpec,
    pub text_style: TextStyle,
}

impl StoreRequest {
    /// Total screenshots across all device profiles.
    pub fn screenshot_count(&self) -> usize {
        self.devices.iter().map(|d| d.screenshots.len()).sum()
    }
}

/// An input that could not be loaded, and the pipeline it blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFailure {
    pub pipeline: PipelineKind,
    pub message: String,
}

impl InputFailure {
    pub fn to_error(&self) -> AssetError {
        AssetError::Unresolved {
            pipeline: self.pipeline,
            message: self.message.clone(),
        }
    }
}

/// Everything the bundler needs to run all three pipelines.
#[derive(Debug, Clone, Default)]
pub struct ExportInputs {
    pub icons: IconsRequest,
    pub splash: SplashRequest,
    pub store: StoreRequest,
    /// Inputs that failed to load. Each one blocks only its own pipeline.
    pub failures: Vec<InputFailure>,
}

impl ExportInputs {
    /// The load failure blocking `pipeline`, if any.
    pub fn failure(&self, pipeline: PipelineKind) -> Option<&InputFailure> {
        self.failures.iter().find(|f| f.pipeline == pipeline)
    }

    /// Whether a pipeline's inputs loaded and its precondition holds.
    pub fn is_ready(&self, pipeline: PipelineKind) -> bool {
        if self.failure(pipeline).is_some() {
            return false;
        }
        match pipeline {
            PipelineKind::Icons => self.icons.logo.is_some(),
            PipelineKind::Splash => self.splash.logo.is_some(),
            PipelineKind::Store => self.store.screenshot_count() > 0,
        }
    }
}
