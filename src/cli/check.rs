//! Check command implementation.
//!
//! Resolves the manifest (so every image is decoded once) and reports which
//! pipelines would run, without rendering anything.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::export::{ExportInputs, PipelineKind};
use crate::output::{plural, Printer};

use super::Project;

/// Report which pipelines can run
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the manifest (default: ./storeart.yaml)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,
}

/// Readiness of one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStatus {
    pub pipeline: PipelineKind,
    pub ready: bool,
    pub detail: String,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let project = Project::open(args.manifest.as_deref(), printer)?;
    let statuses = pipeline_statuses(&project.inputs);

    for status in &statuses {
        let line = format!("{}: {}", status.pipeline, status.detail);
        if status.ready {
            printer.success("Ready", &line);
        } else {
            printer.warning("Blocked", &line);
        }
    }

    if project.inputs.is_ready(PipelineKind::Store) {
        let fonts = project.font_book();
        if fonts.resolve(&project.inputs.store.text_style).is_none() {
            printer.warning("Fonts", "no font found, captions will be skipped");
        } else {
            printer.info("Fonts", &plural(fonts.len(), "face", "faces"));
        }
    }

    let ready = statuses.iter().filter(|s| s.ready).count();
    printer.info("Checked", &format!("{} of {} ready", ready, statuses.len()));
    Ok(())
}

/// Readiness of every pipeline, in bundling order.
pub fn pipeline_statuses(inputs: &ExportInputs) -> Vec<PipelineStatus> {
    PipelineKind::ALL
        .into_iter()
        .map(|pipeline| {
            let ready = inputs.is_ready(pipeline);
            let detail = match (pipeline, inputs.failure(pipeline)) {
                (_, Some(failure)) => failure.message.clone(),
                (PipelineKind::Icons | PipelineKind::Splash, None) if ready => "logo present".to_string(),
                (PipelineKind::Icons | PipelineKind::Splash, None) => "No logo uploaded".to_string(),
                (PipelineKind::Store, None) => {
                    let with_shots: Vec<String> = inputs
                        .store
                        .devices
                        .iter()
                        .filter(|d| !d.screenshots.is_empty())
                        .map(|d| format!("{} ({})", d.name, d.screenshots.len()))
                        .collect();
                    if with_shots.is_empty() {
                        "No screenshots uploaded".to_string()
                    } else {
                        with_shots.join(", ")
                    }
                }
            };
            PipelineStatus {
                pipeline,
                ready,
                detail,
            }
        })
        .collect()
}
