//! Build command implementation.
//!
//! Resolves storeart.yaml and writes one archive per run: a single
//! pipeline's archive, or `all-assets.zip` for everything that can run.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::error::{AssetError, Result};
use crate::export::{
    bundle_all_assets, qualifying_pipelines, run_pipeline, Archive, ExportInputs, PipelineKind,
};
use crate::output::{display_path, human_bytes, plural, Printer};
use crate::render::FontBook;

use super::Project;

/// Which archive to build.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineChoice {
    /// Every pipeline whose inputs are present, bundled in all-assets.zip
    #[default]
    All,
    Icons,
    Splash,
    Store,
}

impl PipelineChoice {
    fn single(self) -> Option<PipelineKind> {
        match self {
            PipelineChoice::All => None,
            PipelineChoice::Icons => Some(PipelineKind::Icons),
            PipelineChoice::Splash => Some(PipelineKind::Splash),
            PipelineChoice::Store => Some(PipelineKind::Store),
        }
    }
}

/// Render archives from storeart.yaml
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the manifest (default: ./storeart.yaml)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Output directory (overrides the manifest)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Pipeline to run
    #[arg(long, short, value_enum, default_value_t = PipelineChoice::All)]
    pub pipeline: PipelineChoice,

    /// Print a JSON report to stdout
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable summary printed by `--json`.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub archives: Vec<ArchiveReport>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveReport {
    pub name: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub pipelines: Vec<PipelineKind>,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let project = Project::open(args.manifest.as_deref(), printer)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| project.root.join(&project.manifest.output));

    let pipelines = match args.pipeline.single() {
        Some(pipeline) => vec![pipeline],
        None => qualifying_pipelines(&project.inputs),
    };

    let mut report = BuildReport { archives: vec![] };

    if pipelines.is_empty() {
        printer.warning(
            "Skipped",
            "nothing to build: no logo and no screenshots configured",
        );
    } else {
        let fonts = if pipelines.contains(&PipelineKind::Store) {
            printer.status("Loading", "fonts");
            project.font_book()
        } else {
            FontBook::new()
        };

        for pipeline in &pipelines {
            printer.status("Rendering", &pipeline.to_string());
        }

        let archive = build_archive(args.pipeline, &project.inputs, &fonts)?;
        let path = archive.write_to(&output)?;

        printer.success(
            "Finished",
            &format!(
                "{} ({}, {})",
                display_path(&path),
                plural(pipelines.len(), "pipeline", "pipelines"),
                human_bytes(archive.bytes.len())
            ),
        );

        report.archives.push(ArchiveReport {
            name: archive.name,
            path,
            bytes: archive.bytes.len(),
            pipelines,
        });
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| AssetError::Encode {
            path: "build report".to_string(),
            message: e.to_string(),
        })?;
        println!("{}", json);
    }

    Ok(())
}

/// Run the chosen pipeline, or bundle everything for [`PipelineChoice::All`].
pub fn build_archive(choice: PipelineChoice, inputs: &ExportInputs, fonts: &FontBook) -> Result<Archive> {
    match choice.single() {
        Some(pipeline) => run_pipeline(pipeline, inputs, fonts),
        None => bundle_all_assets(inputs, fonts),
    }
}
