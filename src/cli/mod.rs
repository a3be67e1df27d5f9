pub mod build;
pub mod check;
pub mod completions;
pub mod devices;
pub mod init;
pub mod preview;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::export::ExportInputs;
use crate::manifest::{FsImageLoader, Manifest};
use crate::output::{display_path, Printer};
use crate::render::FontBook;

/// storeart - App-store icon, splash screen and screenshot generator
#[derive(Parser, Debug)]
#[command(name = "storeart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render archives from storeart.yaml
    Build(build::BuildArgs),

    /// Report which pipelines can run
    Check(check::CheckArgs),

    /// List builtin device profiles
    Devices(devices::DevicesArgs),

    /// Initialize a storeart project (generates storeart.yaml)
    Init(init::InitArgs),

    /// Render a single surface to a PNG file
    Preview(preview::PreviewArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// A manifest resolved into pipeline inputs, plus what it took to get there.
pub struct Project {
    pub manifest_path: PathBuf,
    pub root: PathBuf,
    pub manifest: Manifest,
    pub inputs: ExportInputs,
}

impl Project {
    /// Locate, parse and resolve the manifest.
    pub fn open(explicit: Option<&Path>, printer: &Printer) -> Result<Self> {
        let manifest_path = Manifest::locate(explicit, Path::new("."))?;
        let root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        printer.status("Loading", &display_path(&manifest_path));
        let manifest = Manifest::load(&manifest_path)?;
        let inputs = manifest.resolve(&root, &FsImageLoader::new(&root));
        for failure in &inputs.failures {
            printer.warning("Blocked", &failure.to_error().to_string());
        }

        Ok(Self {
            manifest_path,
            root,
            manifest,
            inputs,
        })
    }

    pub fn font_book(&self) -> FontBook {
        self.manifest.font_book(&self.root)
    }
}
