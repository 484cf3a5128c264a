//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (best compression, adaptive filter) |
//! | Encode → ICO | `image::codecs::ico::IcoEncoder` (PNG-in-ICO) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{IconParams, ResizeParams};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::BufWriter;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

fn create_writer(path: &Path) -> Result<BufWriter<std::fs::File>, BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    Ok(BufWriter::new(file))
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "avif" => save_avif(img, path, quality),
        "png" => save_png(img, path),
        "ico" => save_ico(img, path),
        other => Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            other
        ))),
    }
}

/// Encode and save as AVIF using rav1e (speed=6 for reasonable throughput).
fn save_avif(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(
        create_writer(path)?,
        6,
        quality as u8,
    );
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("AVIF encode failed: {}", e)))
}

/// PNG is lossless; quality is ignored and the encoder works hardest on size.
fn save_png(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    let encoder = PngEncoder::new_with_quality(
        create_writer(path)?,
        CompressionType::Best,
        PngFilter::Adaptive,
    );
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))
}

fn save_ico(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    if img.width() > 256 || img.height() > 256 {
        return Err(BackendError::ProcessingFailed(format!(
            "ICO images are limited to 256x256, got {}x{}",
            img.width(),
            img.height()
        )));
    }
    let encoder = image::codecs::ico::IcoEncoder::new(create_writer(path)?);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("ICO encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = if img.width() == params.width && img.height() == params.height {
            img
        } else {
            img.resize_exact(params.width, params.height, FilterType::Lanczos3)
        };
        save_image(&resized, &params.output, params.quality.value())
    }

    fn icon(&self, params: &IconParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let crop = params.crop;
        if crop.x + crop.width > img.width() || crop.y + crop.height > img.height() {
            return Err(BackendError::ProcessingFailed(format!(
                "Crop {}x{}+{}+{} exceeds {}x{} image {}",
                crop.width,
                crop.height,
                crop.x,
                crop.y,
                img.width(),
                img.height(),
                params.source.display()
            )));
        }
        let square = img
            .crop_imm(crop.x, crop.y, crop.width, crop.height)
            .resize_exact(params.size, params.size, FilterType::Lanczos3);
        // Icons are lossless formats; quality is unused.
        save_image(&square, &params.output, 100)
    }
}
