//! Splash screen pipeline: one centred-logo screen per platform.

use crate::error::{AssetError, Result};
use crate::render::{draw_centered_logo, normalize_alpha, surface_with_background, RasterArtifact};
use crate::types::{Platform, ANDROID_SPLASH, IOS_SPLASH};

use super::{Archive, ArchiveBuilder, PipelineKind, SplashRequest};

/// Generate `splash-screens.zip`.
pub fn generate_splash_screens(request: &SplashRequest) -> Result<Archive> {
    let logo = request.logo.as_deref().ok_or_else(|| AssetError::Precondition {
        pipeline: PipelineKind::Splash,
        message: "No logo uploaded".to_string(),
        help: Some("Set splash.logo in storeart.yaml".to_string()),
    })?;

    let mut archive = ArchiveBuilder::with_platform_folders(PipelineKind::Splash.archive_name());

    for (platform, size) in [(Platform::Ios, IOS_SPLASH), (Platform::Android, ANDROID_SPLASH)] {
        let mut surface = surface_with_background(size, &request.background);
        draw_centered_logo(&mut surface, logo);
        if platform.requires_opaque() {
            normalize_alpha(&mut surface);
        }
        archive.add_artifact(RasterArtifact::encode("splash.png", &surface)?.in_folder(platform.dir()));
    }

    archive.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::is_opaque;
    use crate::types::{BackgroundSpec, Colour};
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;

    fn decode(archive: &Archive, path: &str) -> RgbaImage {
        image::load_from_memory(&archive.read_file(path).unwrap())
            .unwrap()
            .to_rgba8()
    }

    #[test]
    fn test_missing_logo_is_precondition_error() {
        let err = generate_splash_screens(&SplashRequest::default()).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_splash_sizes_and_alpha() {
        // Translucent background: iOS gets flattened, Android keeps it.
        let request = SplashRequest {
            logo: Some(Arc::new(RgbaImage::from_pixel(32, 32, Rgba([0, 0, 255, 255])))),
            background: BackgroundSpec::SolidColor(Colour::new(255, 0, 0, 128)),
        };
        let archive = generate_splash_screens(&request).unwrap();

        assert_eq!(
            archive.entry_names().unwrap(),
            vec!["ios/", "android/", "ios/splash.png", "android/splash.png"]
        );

        let ios = decode(&archive, "ios/splash.png");
        assert_eq!(ios.dimensions(), (414, 896));
        assert!(is_opaque(&ios));
        assert_eq!(ios.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(ios.get_pixel(207, 448).0, [0, 0, 255, 255]);

        let android = decode(&archive, "android/splash.png");
        assert_eq!(android.dimensions(), (360, 740));
        assert!(android.get_pixel(0, 0).0[3] < 255);
        assert_eq!(android.get_pixel(180, 370).0, [0, 0, 255, 255]);
    }
}
