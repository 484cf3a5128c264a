//! Pure calculation functions for image dimensions and size reports.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::CropRegion;

/// The leftmost square of an image.
///
/// The logo artwork places the emblem at the left edge with the wordmark to
/// its right, so the icon source is a square anchored at the origin whose side
/// is the image height (or the width, if the image is taller than wide).
///
/// ```text
/// ┌────────┬──────────────────┐
/// │ emblem │  wordmark        │
/// └────────┴──────────────────┘
///  side = min(height, width)
/// ```
pub fn emblem_crop(dims: (u32, u32)) -> CropRegion {
    let (width, height) = dims;
    let side = width.min(height);
    CropRegion {
        x: 0,
        y: 0,
        width: side,
        height: side,
    }
}

/// Scale dimensions down to at most `max_width`, preserving aspect ratio.
///
/// Images already within the limit are returned unchanged (never enlarged).
/// The height never rounds down to zero.
pub fn fit_width(original: (u32, u32), max_width: u32) -> (u32, u32) {
    let (w, h) = original;
    if w <= max_width {
        return (w, h);
    }
    let scaled = (h as f64 * max_width as f64 / w as f64).round() as u32;
    (max_width, scaled.max(1))
}

/// Percentage saved going from `original` bytes to `optimized` bytes.
///
/// Negative when the optimized file is larger. Zero when the original is empty.
pub fn savings_percent(original: u64, optimized: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - optimized as f64) / original as f64 * 100.0
}
