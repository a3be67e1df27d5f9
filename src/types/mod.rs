//! Core domain types for storeart.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `BackgroundSpec` - solid, gradient or image backgrounds
//! - `DeviceProfile` / `Screenshot` - store-graphics targets
//! - `TextStyle` - caption font and colour
//! - output size constants

mod background;
mod colour;
mod device;
mod sizes;
mod text;

pub use background::{BackgroundSpec, EncodedBackground};
pub use colour::Colour;
pub use device::{
    is_ios_family, slugify, BuiltinDevices, DeviceProfile, Platform, Screenshot,
    DEFAULT_CAPTIONS, MAX_SCREENSHOTS,
};
pub use sizes::{
    icon_file_name, Dimensions, ANDROID_ICON_SIZES, ANDROID_SPLASH, FEATURE_GRAPHIC,
    ICON_MASTER_SIZE, IOS_ICON_SIZES, IOS_SPLASH,
};
pub use text::{FontWeight, TextStyle, CAPTION_FONT_SIZE};
