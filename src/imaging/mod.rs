//! Image processing for the site's icons and optimized artwork.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Icon** | `crop_imm` left square + Lanczos3 → PNG / ICO |
//! | **Resize → AVIF / PNG** | Lanczos3 + rav1e / deflate |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop, fit and savings math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::savings_percent;
pub use operations::{
    ICON_SET, IconSpec, LOGO_STEM, LogoConfig, get_dimensions, plan_conversion,
    plan_icons, plan_logo,
};
pub use params::{CropRegion, IconParams, Quality, ResizeParams};
pub use rust_backend::RustBackend;
