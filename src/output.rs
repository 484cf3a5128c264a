//! CLI output formatting for all build stages.
//!
//! Every stage has a `format_*` function returning display lines, and a
//! `print_*` wrapper that writes them to stdout. Format functions are pure:
//! no I/O, no side effects. Diagnostics go through `tracing` on stderr;
//! this module is only the user-facing summary.
//!
//! # Output Format
//!
//! ## Assets
//!
//! ```text
//! logo.png → favicon-32x32.png: encoded
//! hero-bg.png → hero-bg.avif: cached
//! gallery-3.png: skipped (not found)
//!
//! Icons
//!     favicon-32x32.png (1.2 KB)
//! Optimized
//!     logo.png → bloomsberry-logo.avif: 812.4 KB → 41.0 KB (95.0% smaller)
//! Skipped
//!     gallery-3.png
//! Copied 6 originals, 3 cached, 9 encoded (12 total)
//! ```
//!
//! ## Pages
//!
//! ```text
//! Home → index.html (38.1 KB)
//! Menu → menu/index.html (31.7 KB)
//! Contact → contact/index.html (fallback)
//!     error.html
//!     site.webmanifest
//! Generated 3 pages, 1 fallback
//! ```

use crate::assets::{AssetEvent, AssetReport, OutputKind, OutputStatus};
use crate::config::SiteConfig;
use crate::contact::FormStatus;
use crate::generate::GenerateReport;
use crate::menu::MenuCategory;
use crate::nav::Route;
use std::time::Duration;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// `75.0% smaller`, or `12.0% larger` when encoding grew the file.
fn format_savings(percent: f64) -> String {
    if percent < 0.0 {
        format!("{:.1}% larger", -percent)
    } else {
        format!("{:.1}% smaller", percent)
    }
}

fn status_label(status: OutputStatus) -> &'static str {
    match status {
        OutputStatus::Encoded => "encoded",
        OutputStatus::Cached => "cached",
    }
}

fn route_label(route: Route) -> &'static str {
    match route {
        Route::Home => "Home",
        Route::Menu => "Menu",
        Route::Contact => "Contact",
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Assets
// ============================================================================

/// Format a single progress event from the assets stage.
pub fn format_asset_event(event: &AssetEvent) -> Vec<String> {
    match event {
        AssetEvent::Copied { count } => {
            vec![format!("Copied {}", plural(*count, "original", "originals"))]
        }
        AssetEvent::Written { source, file } => vec![format!(
            "{} \u{2192} {}: {}",
            source,
            file.name,
            status_label(file.status)
        )],
        AssetEvent::Skipped { source } => vec![format!("{}: skipped (not found)", source)],
        AssetEvent::Failed { output, error } => vec![format!("{}: failed ({})", output, error)],
    }
}

/// Format the end-of-stage summary: icons, savings per optimized file,
/// skipped and failed inputs, cache stats.
pub fn format_asset_report(report: &AssetReport) -> Vec<String> {
    let mut lines = Vec::new();

    let icons: Vec<_> = report
        .sources
        .iter()
        .flat_map(|s| s.outputs.iter())
        .filter(|f| f.kind == OutputKind::Icon)
        .collect();
    if !icons.is_empty() {
        lines.push("Icons".to_string());
        for icon in icons {
            lines.push(format!("    {} ({})", icon.name, format_kb(icon.bytes)));
        }
    }

    if report.sources.iter().any(|s| s.optimized().next().is_some()) {
        lines.push("Optimized".to_string());
        for source in &report.sources {
            for file in source.optimized() {
                lines.push(format!(
                    "    {} \u{2192} {}: {} \u{2192} {} ({})",
                    source.source,
                    file.name,
                    format_kb(source.original_bytes),
                    format_kb(file.bytes),
                    format_savings(source.savings(file))
                ));
            }
        }
    }

    if !report.skipped.is_empty() {
        lines.push("Skipped".to_string());
        for name in &report.skipped {
            lines.push(format!("    {}", name));
        }
    }

    if !report.failed.is_empty() {
        lines.push("Failed".to_string());
        for failure in &report.failed {
            lines.push(format!("    {}: {}", failure.output, failure.error));
        }
    }

    lines.push(format!(
        "Copied {}, {}",
        plural(report.copied, "original", "originals"),
        report.cache_stats
    ));
    lines
}

pub fn print_asset_report(report: &AssetReport) {
    for line in format_asset_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Format pages stage output: one line per route, then extras.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    for page in &report.pages {
        let detail = if page.fallback {
            "fallback".to_string()
        } else {
            format_kb(page.bytes as u64)
        };
        lines.push(format!(
            "{} \u{2192} {} ({})",
            route_label(page.route),
            page.path.display(),
            detail
        ));
    }
    for extra in &report.extras {
        lines.push(format!("    {}", extra.display()));
    }

    let fallbacks = report.fallbacks();
    let mut summary = format!(
        "Generated {}",
        plural(report.pages.len(), "page", "pages")
    );
    if fallbacks > 0 {
        summary.push_str(&format!(", {}", plural(fallbacks, "fallback", "fallbacks")));
    }
    lines.push(summary);
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summarize a validated config and menu.
pub fn format_check_output(config: &SiteConfig, categories: &[MenuCategory]) -> Vec<String> {
    let mut lines = vec![
        "Config".to_string(),
        format!("    Site: {} ({})", config.site.name, config.site.url),
        format!(
            "    Navigation: solid after {}px, anchor {}px",
            config.navigation.scroll_threshold, config.navigation.anchor_offset
        ),
        format!(
            "    Contact form: {}ms send, {}ms confirmation",
            config.contact_form.submit_delay_ms, config.contact_form.confirmation_ms
        ),
        format!(
            "    Images: quality {}, logo {} (max {}px), {} to optimize",
            config.images.quality,
            config.images.logo,
            config.images.logo_width,
            config.images.optimize.len()
        ),
        "Menu".to_string(),
    ];
    for (i, category) in categories.iter().enumerate() {
        let popular = category.items.iter().filter(|item| item.popular).count();
        lines.push(format!(
            "    {} {} ({}, {} popular)",
            format_index(i + 1),
            category.title,
            plural(category.items.len(), "item", "items"),
            popular
        ));
    }
    let total: usize = categories.iter().map(|c| c.items.len()).sum();
    lines.push(format!(
        "OK: {}, {}",
        plural(categories.len(), "category", "categories"),
        plural(total, "item", "items")
    ));
    lines
}

pub fn print_check_output(config: &SiteConfig, categories: &[MenuCategory]) {
    for line in format_check_output(config, categories) {
        println!("{}", line);
    }
}

// ============================================================================
// Contact submission
// ============================================================================

/// One status transition, stamped with time since submit.
pub fn format_contact_status(status: FormStatus, elapsed: Duration) -> String {
    format!("{:>6}ms  {}", elapsed.as_millis(), status.as_str())
}

// ============================================================================
// Tests
// ============================================================================
