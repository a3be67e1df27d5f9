//! Init command implementation.
//!
//! Writes a starter `storeart.yaml` listing the builtin devices, with any
//! images already sitting in the directory filled in.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::error::{AssetError, Result};
use crate::manifest::MANIFEST_FILENAME;
use crate::output::{display_path, plural, Printer};
use crate::types::{BackgroundSpec, BuiltinDevices};

/// Initialize a storeart project by generating a storeart.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing storeart.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(AssetError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::create_dir_all(&args.path).map_err(|e| AssetError::Io {
        path: args.path.clone(),
        message: format!("Failed to create project directory: {}", e),
    })?;

    printer.status("Scanning", &display_path(&args.path));
    let images = find_images(&args.path);
    let logo = images
        .iter()
        .find(|name| name.to_lowercase().contains("logo"))
        .cloned();

    let yaml = starter_manifest(logo.as_deref());

    fs::write(&manifest_path, &yaml).map_err(|e| AssetError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if let Some(logo) = &logo {
        printer.info("Discovered", &format!("logo {}", logo));
    }
    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(images.len(), "image", "images")
        ),
    );

    Ok(())
}

/// Image files directly inside `dir`, by name.
fn find_images(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|name| {
            let lower = name.to_lowercase();
            lower.ends_with(".png") || lower.ends_with(".jpg") || lower.ends_with(".jpeg")
        })
        .collect()
}

/// Build YAML manually for clean formatting.
pub fn starter_manifest(logo: Option<&str>) -> String {
    let background = BackgroundSpec::default()
        .encode()
        .unwrap_or_else(|| "#ffffff".to_string());
    let logo_line = match logo {
        Some(logo) => format!("  logo: {}\n", logo),
        None => "  # logo: logo.png\n".to_string(),
    };

    let mut yaml = String::new();
    yaml.push_str("output: dist\n");
    yaml.push_str("# fonts: [fonts/]\n\n");

    yaml.push_str("icons:\n");
    yaml.push_str(&logo_line);
    yaml.push_str(&format!("  background: \"{}\"\n", background));
    yaml.push_str("  layout: centered\n\n");

    yaml.push_str("splash:\n");
    yaml.push_str(&logo_line);
    yaml.push_str(&format!("  background: \"{}\"\n\n", background));

    yaml.push_str("store:\n");
    yaml.push_str(&format!("  background: \"{}\"\n", background));
    yaml.push_str("  text_style: { font_family: Inter, font_weight: \"600\", color: \"#000000\" }\n");
    yaml.push_str("  devices:\n");
    for device in BuiltinDevices::all() {
        yaml.push_str(&format!(
            "    - name: {}\n      screenshots: []\n",
            device.name
        ));
    }

    yaml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_manifest() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join("storeart.yaml")).unwrap();
        assert!(content.contains("output: dist"));
        assert!(content.contains("# logo: logo.png"));
        assert!(content.contains("- name: iOS Pro"));
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("storeart.yaml"), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        let result = run(args, &Printer::new());
        assert!(matches!(result, Err(AssetError::Build { .. })));
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("storeart.yaml"), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join("storeart.yaml")).unwrap();
        assert!(content.contains("output: dist"));
    }

    #[test]
    fn test_init_discovers_logo() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app-logo.png"), b"png").unwrap();
        fs::write(dir.path().join("notes.txt"), b"txt").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join("storeart.yaml")).unwrap();
        assert!(content.contains("  logo: app-logo.png"));
    }

    #[test]
    fn test_starter_manifest_parses() {
        let manifest = Manifest::parse(&starter_manifest(Some("logo.png"))).unwrap();

        assert_eq!(manifest.icons.logo.as_deref(), Some("logo.png"));
        assert_eq!(manifest.splash.background.as_deref(), Some("#ffffff"));
        let devices = manifest.store.devices.unwrap();
        assert_eq!(devices.len(), 4);
        assert!(devices.iter().all(|d| d.screenshots.is_empty()));
    }
}
