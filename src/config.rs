//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults carry
//! the live Bloomsberry content; a user `config.toml` only needs the keys it
//! wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Bloomsberry"
//! tagline = "The Art of Coffee & Conversation"
//! url = "https://bloomsberry.com"
//! established = 2025
//!
//! [contact]
//! phone = "01934-472047"
//! email = "bloomsberrybd@gmail.com"
//! whatsapp_number = "8801934472047"
//!
//! [social]
//! facebook = "https://www.facebook.com/bloomsberrybd/"
//! instagram = "https://www.instagram.com/bloomsberrycafe/"
//!
//! [navigation]
//! scroll_threshold = 50     # px scrolled before the navbar turns solid
//! anchor_offset = 150       # px from the top used to pick the active section
//! menu_category = ""        # tab shown on /menu without a #fragment (empty = first)
//!
//! [contact_form]
//! submit_delay_ms = 1500    # simulated transport delay
//! confirmation_ms = 5000    # how long the "thank you" state stays up
//!
//! [colors]
//! primary = "#5F8F72"
//!
//! [images]
//! quality = 85
//! logo = "logo.png"
//! logo_width = 400
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::menu;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity used in titles, metadata and the navbar logo.
    pub site: SiteInfo,
    /// Address, hours, phone, email, map and WhatsApp targets.
    pub contact: ContactInfo,
    /// Social profile URLs.
    pub social: SocialLinks,
    /// Scroll tracking thresholds shared by the renderer and `nav.js`.
    pub navigation: NavigationConfig,
    /// Timing of the simulated contact form submission.
    pub contact_form: ContactFormConfig,
    /// Brand palette, emitted as CSS custom properties.
    pub colors: Palette,
    /// Source artwork and encoding settings for the assets stage.
    pub images: ImagesConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality == 0 || self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.images.logo_width == 0 {
            return Err(ConfigError::Validation(
                "images.logo_width must be non-zero".into(),
            ));
        }
        if self.navigation.anchor_offset == 0 {
            return Err(ConfigError::Validation(
                "navigation.anchor_offset must be non-zero".into(),
            ));
        }
        let menu_category = &self.navigation.menu_category;
        if !menu_category.is_empty() && menu::find_category(menu_category).is_none() {
            return Err(ConfigError::Validation(format!(
                "navigation.menu_category: no menu category named '{menu_category}'"
            )));
        }
        if self.contact.whatsapp_number.is_empty()
            || !self.contact.whatsapp_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::Validation(
                "contact.whatsapp_number must be digits only (country code included)".into(),
            ));
        }
        if self.contact_form.submit_delay_ms == 0 || self.contact_form.confirmation_ms == 0 {
            return Err(ConfigError::Validation(
                "contact_form delays must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    /// Canonical URL, no trailing slash.
    pub url: String,
    pub established: u32,
    /// Meta description shared by all pages.
    pub description: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Bloomsberry".to_string(),
            tagline: "The Art of Coffee & Conversation".to_string(),
            url: "https://bloomsberry.com".to_string(),
            established: 2025,
            description: "Experience the finest coffee and Pan Asian fusion cuisine at \
                          Bloomsberry. A botanical sanctuary for meaningful connections in the \
                          heart of Dhanmondi, Dhaka."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactInfo {
    pub address: String,
    pub hours: String,
    /// Phone number as displayed.
    pub phone: String,
    pub email: String,
    /// Google Maps search link ("Get Directions").
    pub maps_url: String,
    /// Google Maps embed URL for the iframe.
    pub map_embed_url: String,
    /// Digits only, with country code, as `wa.me` expects.
    pub whatsapp_number: String,
    /// Pre-filled WhatsApp message.
    pub whatsapp_message: String,
}

impl ContactInfo {
    /// `tel:` link for the display number (spaces dropped).
    pub fn phone_href(&self) -> String {
        let digits: String = self.phone.chars().filter(|c| !c.is_whitespace()).collect();
        format!("tel:{digits}")
    }

    pub fn email_href(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            address: "Concord Sohel Square, Plot No. 75, 13th Floor, Satmasjid Road, \
                      Dhanmondi 27, Dhaka"
                .to_string(),
            hours: "Daily — 11:00 AM to 11:00 PM".to_string(),
            phone: "01934-472047".to_string(),
            email: "bloomsberrybd@gmail.com".to_string(),
            maps_url: "https://maps.google.com/?q=Concord+Sohel+Square+Dhanmondi".to_string(),
            map_embed_url: "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3651.9806461937517!2d90.3708871!3d23.7505962!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3755b8b6066f272b%3A0xe5a3cbe54f676239!2sConcord%20Sohel%20Square!5e0!3m2!1sen!2sbd!4v1700000000000!5m2!1sen!2sbd".to_string(),
            whatsapp_number: "8801934472047".to_string(),
            whatsapp_message: "Hello Bloomsberry! I would like to make a reservation.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            facebook: "https://www.facebook.com/bloomsberrybd/".to_string(),
            instagram: "https://www.instagram.com/bloomsberrycafe/".to_string(),
        }
    }
}

/// Scroll tracking thresholds, in CSS pixels, and the menu's opening tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Offset past which the navbar switches to its solid background.
    pub scroll_threshold: u32,
    /// Distance of the anchor line from the viewport top.
    pub anchor_offset: u32,
    /// Category id selected on `/menu` when the URL carries no fragment.
    /// Empty selects the first category.
    pub menu_category: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50,
            anchor_offset: 150,
            menu_category: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactFormConfig {
    pub submit_delay_ms: u64,
    pub confirmation_ms: u64,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            confirmation_ms: 5000,
        }
    }
}

/// Brand palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Buttons, labels, active accents.
    pub primary: String,
    /// Hover states.
    pub secondary: String,
    /// Soft tints and the active nav link.
    pub accent: String,
    /// Headings and the solid navbar.
    pub ink: String,
    /// Body copy.
    pub muted: String,
    /// Page background tint.
    pub surface: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#5F8F72".to_string(),
            secondary: "#7FA88A".to_string(),
            accent: "#AFC8B2".to_string(),
            ink: "#2D3A2F".to_string(),
            muted: "#5F6B61".to_string(),
            surface: "#F8FAF8".to_string(),
        }
    }
}

/// Source artwork and encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// AVIF encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Logo file in the source directory; icons are cropped from it.
    pub logo: String,
    /// Maximum width of the optimized logo. Smaller logos are never enlarged.
    pub logo_width: u32,
    /// Images converted to AVIF. Missing files are skipped.
    pub optimize: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            quality: 85,
            logo: "logo.png".to_string(),
            logo_width: 400,
            optimize: [
                "hero-bg.png",
                "about-img.png",
                "gallery-1.png",
                "gallery-2.png",
                "gallery-3.png",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(dir = %root.display(), "config loaded");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Bloomsberry Site Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Identity
# ---------------------------------------------------------------------------
[site]
name = "Bloomsberry"
tagline = "The Art of Coffee & Conversation"
# Canonical URL, no trailing slash.
url = "https://bloomsberry.com"
established = 2025
description = "Experience the finest coffee and Pan Asian fusion cuisine at Bloomsberry. A botanical sanctuary for meaningful connections in the heart of Dhanmondi, Dhaka."

# ---------------------------------------------------------------------------
# Contact details
# ---------------------------------------------------------------------------
[contact]
address = "Concord Sohel Square, Plot No. 75, 13th Floor, Satmasjid Road, Dhanmondi 27, Dhaka"
hours = "Daily — 11:00 AM to 11:00 PM"
phone = "01934-472047"
email = "bloomsberrybd@gmail.com"
maps_url = "https://maps.google.com/?q=Concord+Sohel+Square+Dhanmondi"
map_embed_url = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3651.9806461937517!2d90.3708871!3d23.7505962!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3755b8b6066f272b%3A0xe5a3cbe54f676239!2sConcord%20Sohel%20Square!5e0!3m2!1sen!2sbd!4v1700000000000!5m2!1sen!2sbd"
# Digits only, with country code.
whatsapp_number = "8801934472047"
whatsapp_message = "Hello Bloomsberry! I would like to make a reservation."

# ---------------------------------------------------------------------------
# Social profiles
# ---------------------------------------------------------------------------
[social]
facebook = "https://www.facebook.com/bloomsberrybd/"
instagram = "https://www.instagram.com/bloomsberrycafe/"

# ---------------------------------------------------------------------------
# Navigation (pixels)
# ---------------------------------------------------------------------------
[navigation]
# Scroll offset past which the navbar turns solid.
scroll_threshold = 50
# Distance of the anchor line from the viewport top; the first section
# straddling it is highlighted in the navbar.
anchor_offset = 150
# Menu tab shown on /menu when the URL has no #fragment: one of "coffee",
# "cold", "food", "desserts". Empty selects the first.
menu_category = ""

# ---------------------------------------------------------------------------
# Contact form (milliseconds)
# ---------------------------------------------------------------------------
[contact_form]
# Simulated submission delay.
submit_delay_ms = 1500
# How long the confirmation stays visible.
confirmation_ms = 5000

# ---------------------------------------------------------------------------
# Palette
# ---------------------------------------------------------------------------
[colors]
primary = "#5F8F72"
secondary = "#7FA88A"
accent = "#AFC8B2"
ink = "#2D3A2F"
muted = "#5F6B61"
surface = "#F8FAF8"

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# AVIF encoding quality (1 = worst, 100 = best).
quality = 85
# Logo in the source directory; favicons are cropped from its left square.
logo = "logo.png"
# Maximum width of the optimized logo (never enlarged).
logo_width = 400
# Images converted to AVIF. Missing files are skipped.
optimize = ["hero-bg.png", "about-img.png", "gallery-1.png", "gallery-2.png", "gallery-3.png"]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from the palette.
pub fn generate_palette_css(colors: &Palette) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-secondary: {secondary};
    --color-accent: {accent};
    --color-ink: {ink};
    --color-muted: {muted};
    --color-surface: {surface};
}}"#,
        primary = colors.primary,
        secondary = colors.secondary,
        accent = colors.accent,
        ink = colors.ink,
        muted = colors.muted,
        surface = colors.surface,
    )
}
