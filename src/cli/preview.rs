//! Preview command: render one surface straight to a PNG file.
//!
//! Uses exactly the same drawing steps as the pipelines, so what the
//! preview shows is what ends up in the archive.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use image::RgbaImage;

use crate::error::{AssetError, Result};
use crate::export::{compose_icon_master, ExportInputs, PipelineKind};
use crate::output::{display_path, Printer};
use crate::render::{
    draw_centered_logo, draw_screenshot_with_captions, normalize_alpha, surface_with_background,
    write_png, FontBook,
};
use crate::types::{BackgroundSpec, Dimensions, Platform, ANDROID_SPLASH, FEATURE_GRAPHIC, IOS_SPLASH};

use super::Project;

/// Which surface to preview.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSurface {
    /// 1024x1024 iOS icon master
    IconMaster,
    /// 1024x500 Android feature graphic
    FeatureGraphic,
    SplashIos,
    SplashAndroid,
    /// One store screenshot
    Screenshot,
}

impl PreviewSurface {
    /// The pipeline that renders this surface.
    pub fn pipeline(self) -> PipelineKind {
        match self {
            PreviewSurface::IconMaster | PreviewSurface::FeatureGraphic => PipelineKind::Icons,
            PreviewSurface::SplashIos | PreviewSurface::SplashAndroid => PipelineKind::Splash,
            PreviewSurface::Screenshot => PipelineKind::Store,
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            PreviewSurface::IconMaster => "icon-master",
            PreviewSurface::FeatureGraphic => "feature-graphic",
            PreviewSurface::SplashIos => "splash-ios",
            PreviewSurface::SplashAndroid => "splash-android",
            PreviewSurface::Screenshot => "screenshot",
        }
    }
}

/// Render a single surface to a PNG file
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Surface to render
    #[arg(value_enum)]
    pub surface: PreviewSurface,

    /// Path to the manifest (default: ./storeart.yaml)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Device for `screenshot` (default: first device with screenshots)
    #[arg(long, short)]
    pub device: Option<String>,

    /// Screenshot number, starting at 1
    #[arg(long, short, default_value_t = 1)]
    pub index: usize,

    /// Output PNG path (default: <surface>.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: PreviewArgs, printer: &Printer) -> Result<()> {
    let project = Project::open(args.manifest.as_deref(), printer)?;
    let fonts = if args.surface == PreviewSurface::Screenshot {
        project.font_book()
    } else {
        FontBook::new()
    };

    let surface = render_preview(
        args.surface,
        &project.inputs,
        &fonts,
        args.device.as_deref(),
        args.index,
    )?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", args.surface.file_stem())));
    write_png(&surface, &path)?;

    printer.success(
        "Rendered",
        &format!("{} ({}x{})", display_path(&path), surface.width(), surface.height()),
    );
    Ok(())
}

/// Render one surface, alpha-normalized where the pipeline would.
pub fn render_preview(
    surface: PreviewSurface,
    inputs: &ExportInputs,
    fonts: &FontBook,
    device: Option<&str>,
    index: usize,
) -> Result<RgbaImage> {
    if let Some(failure) = inputs.failure(surface.pipeline()) {
        return Err(failure.to_error());
    }

    match surface {
        PreviewSurface::IconMaster => {
            let logo = require_logo(inputs.icons.logo.as_deref(), PipelineKind::Icons)?;
            let mut master = compose_icon_master(logo, &inputs.icons.background);
            normalize_alpha(&mut master);
            Ok(master)
        }
        PreviewSurface::FeatureGraphic => {
            let logo = require_logo(inputs.icons.logo.as_deref(), PipelineKind::Icons)?;
            Ok(logo_surface(FEATURE_GRAPHIC, logo, &inputs.icons.background, Platform::Android))
        }
        PreviewSurface::SplashIos | PreviewSurface::SplashAndroid => {
            let logo = require_logo(inputs.splash.logo.as_deref(), PipelineKind::Splash)?;
            let (size, platform) = if surface == PreviewSurface::SplashIos {
                (IOS_SPLASH, Platform::Ios)
            } else {
                (ANDROID_SPLASH, Platform::Android)
            };
            Ok(logo_surface(size, logo, &inputs.splash.background, platform))
        }
        PreviewSurface::Screenshot => render_screenshot(inputs, fonts, device, index),
    }
}

fn require_logo(logo: Option<&RgbaImage>, pipeline: PipelineKind) -> Result<&RgbaImage> {
    logo.ok_or_else(|| AssetError::Precondition {
        pipeline,
        message: "No logo uploaded".to_string(),
        help: None,
    })
}

fn logo_surface(
    size: Dimensions,
    logo: &RgbaImage,
    background: &BackgroundSpec,
    platform: Platform,
) -> RgbaImage {
    let mut out = surface_with_background(size, background);
    draw_centered_logo(&mut out, logo);
    if platform.requires_opaque() {
        normalize_alpha(&mut out);
    }
    out
}

fn render_screenshot(
    inputs: &ExportInputs,
    fonts: &FontBook,
    device: Option<&str>,
    index: usize,
) -> Result<RgbaImage> {
    let store = &inputs.store;
    let profile = match device {
        Some(name) => store
            .devices
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name)),
        None => store.devices.iter().find(|d| !d.screenshots.is_empty()),
    };

    let found = profile.and_then(|p| {
        index
            .checked_sub(1)
            .and_then(|i| p.screenshots.get(i))
            .map(|shot| (p, shot))
    });

    let Some((profile, screenshot)) = found else {
        return Err(AssetError::Precondition {
            pipeline: PipelineKind::Store,
            message: match device {
                Some(name) => format!("No screenshot {} for device '{}'", index, name),
                None => "No screenshots uploaded".to_string(),
            },
            help: Some("Run `storeart check` to see configured screenshots".to_string()),
        });
    };

    let mut out = surface_with_background(
        Dimensions::new(profile.width, profile.height),
        &store.background,
    );
    let font = fonts.resolve(&store.text_style);
    draw_screenshot_with_captions(&mut out, screenshot, &store.text_style, font.as_ref());
    if profile.platform().requires_opaque() {
        normalize_alpha(&mut out);
    }
    Ok(out)
}
