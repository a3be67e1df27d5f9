//! All-assets bundler.
//!
//! Runs every pipeline whose precondition holds and nests the resulting
//! archives in `all-assets.zip`. A pipeline that fails its precondition is
//! left out without an error, and one whose inputs failed to load is left
//! out with a warning. Any other failure aborts the bundle.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::render::FontBook;

use super::{
    generate_app_icons, generate_splash_screens, generate_store_graphics, Archive, ArchiveBuilder,
    ExportInputs, PipelineKind,
};

/// Name of the combined archive.
pub const ALL_ASSETS_ARCHIVE: &str = "all-assets.zip";

/// Pipelines whose preconditions hold, in bundling order.
pub fn qualifying_pipelines(inputs: &ExportInputs) -> Vec<PipelineKind> {
    PipelineKind::ALL
        .into_iter()
        .filter(|&pipeline| inputs.is_ready(pipeline))
        .collect()
}

/// Run one pipeline.
///
/// Inputs that failed to load for this pipeline surface here as
/// [`AssetError::Unresolved`](crate::error::AssetError::Unresolved).
pub fn run_pipeline(pipeline: PipelineKind, inputs: &ExportInputs, fonts: &FontBook) -> Result<Archive> {
    if let Some(failure) = inputs.failure(pipeline) {
        return Err(failure.to_error());
    }

    match pipeline {
        PipelineKind::Icons => generate_app_icons(&inputs.icons),
        PipelineKind::Splash => generate_splash_screens(&inputs.splash),
        PipelineKind::Store => generate_store_graphics(&inputs.store, fonts),
    }
}

/// Generate `all-assets.zip` from whichever pipelines can run.
///
/// With no qualifying pipeline the result is an empty archive; callers that
/// care check [`qualifying_pipelines`] first.
pub fn bundle_all_assets(inputs: &ExportInputs, fonts: &FontBook) -> Result<Archive> {
    let mut bundle = ArchiveBuilder::new(ALL_ASSETS_ARCHIVE);

    for pipeline in PipelineKind::ALL {
        if let Some(failure) = inputs.failure(pipeline) {
            warn!(%pipeline, reason = %failure.message, "Skipping pipeline with unloadable inputs");
            continue;
        }

        match run_pipeline(pipeline, inputs, fonts) {
            Ok(archive) => bundle.add_archive(archive),
            Err(err) if err.is_precondition() => {
                debug!(%pipeline, reason = %err, "Skipping pipeline");
            }
            Err(err) => return Err(err),
        }
    }

    info!(archives = bundle.file_count(), "Bundled all assets");
    bundle.finish()
}
