//! storeart - App-store asset generator
//!
//! A library for turning a square logo, a background and a handful of
//! captioned screenshots into the icon sets, splash screens and store
//! graphics the iOS and Android stores ask for, packaged as zip archives.

pub mod cli;
pub mod error;
pub mod export;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod render;
pub mod types;

pub use error::{AssetError, Result};
pub use export::{
    bundle_all_assets, generate_app_icons, generate_splash_screens, generate_store_graphics,
    Archive, ArchiveBuilder, ExportInputs, IconLayout, IconsRequest, InputFailure, PipelineKind,
    SplashRequest, StoreRequest,
};
pub use manifest::{FsImageLoader, ImageLoader, Manifest};
pub use render::{
    draw_background, draw_captions, draw_centered_logo, draw_screenshot, encode_png, expand_sizes,
    normalize_alpha, FontBook, RasterArtifact,
};
pub use types::{
    is_ios_family, slugify, BackgroundSpec, BuiltinDevices, Colour, DeviceProfile, Platform,
    Screenshot, TextStyle,
};
