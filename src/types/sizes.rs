//! Platform-mandated output dimensions.

/// A fixed rectangular output size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// iOS icon sizes, ascending.
pub const IOS_ICON_SIZES: [u32; 30] = [
    16, 20, 29, 32, 40, 48, 50, 55, 57, 58, 60, 64, 72, 76, 80, 87, 88, 100, 114, 120, 128, 144,
    152, 167, 172, 180, 196, 256, 512, 1024,
];

/// Android launcher icon sizes.
pub const ANDROID_ICON_SIZES: [u32; 1] = [512];

/// Side of the square master surface the iOS icon set is expanded from.
pub const ICON_MASTER_SIZE: u32 = 1024;

/// Google Play feature graphic.
pub const FEATURE_GRAPHIC: Dimensions = Dimensions::new(1024, 500);

/// iOS launch screen.
pub const IOS_SPLASH: Dimensions = Dimensions::new(414, 896);

/// Android launch screen.
pub const ANDROID_SPLASH: Dimensions = Dimensions::new(360, 740);

/// File name of a square icon of the given side.
pub fn icon_file_name(size: u32) -> String {
    format!("icon_{size}x{size}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ios_sizes_ascending_and_bounded() {
        assert!(IOS_ICON_SIZES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(IOS_ICON_SIZES.first(), Some(&16));
        assert_eq!(IOS_ICON_SIZES.last(), Some(&ICON_MASTER_SIZE));
    }

    #[test]
    fn test_icon_file_name() {
        assert_eq!(icon_file_name(16), "icon_16x16.png");
        assert_eq!(icon_file_name(1024), "icon_1024x1024.png");
    }
}
