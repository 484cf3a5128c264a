//! Shared test utilities: synthetic source images and a populated `public/`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_public_dir();
//! let public = tmp.path().join("public");
//! assert!(public.join("logo.png").exists());
//! ```

use image::{ImageEncoder, RgbaImage};
use std::path::Path;
use tempfile::TempDir;

/// Logo dimensions used by [`setup_public_dir`]: a wide wordmark with the
/// emblem on the left.
pub const LOGO_DIMS: (u32, u32) = (96, 24);

/// Dimensions of every non-logo image written by [`setup_public_dir`].
pub const PHOTO_DIMS: (u32, u32) = (48, 32);

/// Write a small gradient PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 128, 255])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
}

/// Create `<tmp>/public/` with a logo, the hero and about images, and the
/// first two gallery images. `gallery-3.png` is intentionally absent.
pub fn setup_public_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let public = tmp.path().join("public");
    std::fs::create_dir_all(&public).unwrap();

    create_test_png(&public.join("logo.png"), LOGO_DIMS.0, LOGO_DIMS.1);
    for name in ["hero-bg.png", "about-img.png", "gallery-1.png", "gallery-2.png"] {
        create_test_png(&public.join(name), PHOTO_DIMS.0, PHOTO_DIMS.1);
    }
    std::fs::write(public.join("robots.txt"), "User-agent: *\nAllow: /\n").unwrap();
    tmp
}
