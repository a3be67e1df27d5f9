//! App icon pipeline.
//!
//! ```text
//! app-icons.zip
//!   ios/icon_16x16.png ... icon_1024x1024.png   opaque
//!   android/icon_512x512.png                     raw logo, keeps alpha
//!   android/feature_graphic.png                  1024x500, keeps alpha
//! ```

use image::RgbaImage;
use tracing::debug;

use crate::error::{AssetError, Result};
use crate::render::{draw_centered_logo, expand_sizes, surface_with_background, RasterArtifact};
use crate::types::{
    BackgroundSpec, Dimensions, Platform, ANDROID_ICON_SIZES, FEATURE_GRAPHIC, ICON_MASTER_SIZE,
    IOS_ICON_SIZES,
};

use super::{Archive, ArchiveBuilder, IconLayout, IconsRequest, PipelineKind};

/// Render the 1024x1024 iOS master: background plus the logo at 40%.
pub fn compose_icon_master(logo: &RgbaImage, background: &BackgroundSpec) -> RgbaImage {
    let mut master = surface_with_background(
        Dimensions::new(ICON_MASTER_SIZE, ICON_MASTER_SIZE),
        background,
    );
    draw_centered_logo(&mut master, logo);
    master
}

/// Generate `app-icons.zip`.
pub fn generate_app_icons(request: &IconsRequest) -> Result<Archive> {
    let logo = request.logo.as_deref().ok_or_else(|| AssetError::Precondition {
        pipeline: PipelineKind::Icons,
        message: "No logo uploaded".to_string(),
        help: Some("Set icons.logo in storeart.yaml".to_string()),
    })?;

    let mut archive = ArchiveBuilder::with_platform_folders(PipelineKind::Icons.archive_name());

    let ios_source = match request.layout {
        IconLayout::Centered => compose_icon_master(logo, &request.background),
        IconLayout::FullBleed => logo.clone(),
    };
    let ios = expand_sizes(&ios_source, &IOS_ICON_SIZES, true)?;
    drop(ios_source);
    archive.add_artifacts(ios.into_iter().map(|a| a.in_folder(Platform::Ios.dir())));

    let android = expand_sizes(logo, &ANDROID_ICON_SIZES, false)?;
    archive.add_artifacts(android.into_iter().map(|a| a.in_folder(Platform::Android.dir())));

    let mut feature = surface_with_background(FEATURE_GRAPHIC, &request.background);
    draw_centered_logo(&mut feature, logo);
    archive.add_artifact(
        RasterArtifact::encode("feature_graphic.png", &feature)?.in_folder(Platform::Android.dir()),
    );

    debug!(files = archive.file_count(), "Rendered app icons");
    archive.finish()
}
