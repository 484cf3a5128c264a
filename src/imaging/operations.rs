//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! `plan_*` functions compute parameters without touching pixels; the assets
//! stage identifies each source once and runs the plans on the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{emblem_crop, fit_width};
use super::params::{IconParams, Quality, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// One square icon cut from the logo emblem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub filename: &'static str,
    pub size: u32,
}

/// Every icon the pages reference, in generation order.
pub const ICON_SET: &[IconSpec] = &[
    IconSpec {
        filename: "favicon-32x32.png",
        size: 32,
    },
    IconSpec {
        filename: "favicon-16x16.png",
        size: 16,
    },
    IconSpec {
        filename: "apple-touch-icon.png",
        size: 180,
    },
    IconSpec {
        filename: "favicon.ico",
        size: 32,
    },
    IconSpec {
        filename: "icon-192.png",
        size: 192,
    },
    IconSpec {
        filename: "icon-512.png",
        size: 512,
    },
];

/// Plan every icon in [`ICON_SET`] from a logo of the given dimensions.
pub fn plan_icons(source: &Path, output_dir: &Path, logo_dims: (u32, u32)) -> Vec<IconParams> {
    let crop = emblem_crop(logo_dims);
    ICON_SET
        .iter()
        .map(|spec| IconParams {
            source: source.to_path_buf(),
            output: output_dir.join(spec.filename),
            crop,
            size: spec.size,
        })
        .collect()
}

/// File stem of the optimized logo outputs.
pub const LOGO_STEM: &str = "bloomsberry-logo";

/// Configuration for logo optimization.
#[derive(Debug, Clone)]
pub struct LogoConfig {
    pub max_width: u32,
    pub quality: Quality,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            max_width: 400,
            quality: Quality::default(),
        }
    }
}

/// Plan the optimized logo: an AVIF and a compressed PNG fallback, both
/// scaled to at most `max_width` wide.
pub fn plan_logo(
    source: &Path,
    output_dir: &Path,
    logo_dims: (u32, u32),
    config: &LogoConfig,
) -> Vec<ResizeParams> {
    let (width, height) = fit_width(logo_dims, config.max_width);
    ["avif", "png"]
        .iter()
        .map(|ext| ResizeParams {
            source: source.to_path_buf(),
            output: output_dir.join(format!("{LOGO_STEM}.{ext}")),
            width,
            height,
            quality: config.quality,
        })
        .collect()
}

/// Plan a same-size conversion to AVIF (`hero-bg.png` → `hero-bg.avif`).
pub fn plan_conversion(
    source: &Path,
    output_dir: &Path,
    dims: (u32, u32),
    quality: Quality,
) -> ResizeParams {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    ResizeParams {
        source: source.to_path_buf(),
        output: output_dir.join(format!("{stem}.avif")),
        width: dims.0,
        height: dims.1,
        quality,
    }
}
