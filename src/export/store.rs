//! Store graphics pipeline.
//!
//! One `screenshot-{n}.png` per screenshot, at the device's own size, filed
//! under `{platform}/{device-slug}/`. Devices without screenshots are
//! skipped; the pipeline only needs one screenshot somewhere.

use tracing::{debug, warn};

use crate::error::{AssetError, Result};
use crate::render::{
    draw_screenshot_with_captions, normalize_alpha, surface_with_background, FontBook,
    RasterArtifact,
};
use crate::types::Dimensions;

use super::{Archive, ArchiveBuilder, PipelineKind, StoreRequest};

/// Generate `store-graphics.zip`.
pub fn generate_store_graphics(request: &StoreRequest, fonts: &FontBook) -> Result<Archive> {
    if request.screenshot_count() == 0 {
        return Err(AssetError::Precondition {
            pipeline: PipelineKind::Store,
            message: "No screenshots uploaded".to_string(),
            help: Some("Add screenshots to a device under store.devices".to_string()),
        });
    }

    let font = fonts.resolve(&request.text_style);
    if font.is_none() {
        warn!(
            family = %request.text_style.font_family,
            "No font available, captions will be skipped"
        );
    }

    let mut archive = ArchiveBuilder::with_platform_folders(PipelineKind::Store.archive_name());

    for device in request.devices.iter().filter(|d| !d.screenshots.is_empty()) {
        let platform = device.platform();
        let folder = device.folder();
        let size = Dimensions::new(device.width, device.height);

        debug!(device = %device.name, %platform, screenshots = device.screenshots.len(), "Rendering device");

        for (index, screenshot) in device.screenshots.iter().enumerate() {
            let mut surface = surface_with_background(size, &request.background);
            draw_screenshot_with_captions(&mut surface, screenshot, &request.text_style, font.as_ref());
            if platform.requires_opaque() {
                normalize_alpha(&mut surface);
            }

            let name = format!("screenshot-{}.png", index + 1);
            archive.add_artifact(RasterArtifact::encode(name, &surface)?.in_folder(&folder));
        }
    }

    archive.finish()
}
