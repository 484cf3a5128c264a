//! HTML site generation.
//!
//! The pages stage. Renders every route from config and the compiled-in menu
//! data, each through the render boundary, and writes the result next to the
//! assets stage's output.
//!
//! ## Generated Files
//!
//! ```text
//! dist/
//! ├── index.html            # Home: hero, about, menu teaser, gallery, contact
//! ├── menu/index.html       # Full menu with category tabs
//! ├── contact/index.html    # Contact section on its own
//! ├── error.html            # Standalone fallback screen
//! └── site.webmanifest      # Install metadata (icons from the assets stage)
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into each page:
//! - `static/site.css`: base styles (palette injected from config)
//! - `static/nav.js`: scroll state, section highlighting, mobile menu
//! - `static/reveal.js`: scroll-in animations
//! - `static/boundary.js`: swaps in the fallback screen on script errors
//! - `static/menu.js`: category tabs (menu page only)
//! - `static/contact.js`: form stub (pages with the contact section)

use crate::boundary::{self, RenderError};
use crate::components::{self, GALLERY};
use crate::config::{self, SiteConfig};
use crate::contact::ContactForm;
use crate::menu::{MenuSelector, categories, validate_menu};
use crate::nav::{NavSettings, NavState, Route};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/site.css");
const NAV_JS: &str = include_str!("../static/nav.js");
const REVEAL_JS: &str = include_str!("../static/reveal.js");
const BOUNDARY_JS: &str = include_str!("../static/boundary.js");
const MENU_JS: &str = include_str!("../static/menu.js");
const CONTACT_JS: &str = include_str!("../static/contact.js");
const ABOUT_MD: &str = include_str!("../static/about.md");

pub const ERROR_PAGE: &str = "error.html";
pub const WEB_MANIFEST: &str = "site.webmanifest";

/// One written page.
#[derive(Debug, Clone)]
pub struct PageReport {
    pub route: Route,
    /// Relative to the output directory.
    pub path: PathBuf,
    pub bytes: usize,
    /// The render failed and the fallback screen was written instead.
    pub fallback: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: Vec<PageReport>,
    /// Non-page files, relative to the output directory.
    pub extras: Vec<PathBuf>,
}

impl GenerateReport {
    pub fn fallbacks(&self) -> usize {
        self.pages.iter().filter(|p| p.fallback).count()
    }
}

/// Everything a page render reads.
pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    pub css: String,
    about_md: &'a str,
}

impl<'a> PageContext<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self::with_about(config, ABOUT_MD)
    }

    pub fn with_about(config: &'a SiteConfig, about_md: &'a str) -> Self {
        let css = format!(
            "{}\n\n{}",
            config::generate_palette_css(&config.colors),
            CSS_STATIC
        );
        Self {
            config,
            css,
            about_md,
        }
    }
}

pub fn generate(config: &SiteConfig, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let ctx = PageContext::new(config);
    generate_with(&ctx, output_dir)
}

pub fn generate_with(ctx: &PageContext<'_>, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport::default();

    for route in Route::ALL {
        let guarded = render_guarded(route, ctx);
        let html = guarded.markup.into_string();
        let path = PathBuf::from(route.output_file());
        let target = output_dir.join(&path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &html)?;
        tracing::debug!(page = route.slug(), bytes = html.len(), "wrote page");
        report.pages.push(PageReport {
            route,
            path,
            bytes: html.len(),
            fallback: guarded.failed.is_some(),
        });
    }

    fs::write(
        output_dir.join(ERROR_PAGE),
        boundary::fallback_page(&ctx.css).into_string(),
    )?;
    report.extras.push(PathBuf::from(ERROR_PAGE));

    let manifest = serde_json::to_string_pretty(&WebManifest::from_config(ctx.config))?;
    fs::write(output_dir.join(WEB_MANIFEST), manifest)?;
    report.extras.push(PathBuf::from(WEB_MANIFEST));

    tracing::info!(
        pages = report.pages.len(),
        fallbacks = report.fallbacks(),
        output = %output_dir.display(),
        "site generated"
    );
    Ok(report)
}

/// Render one route through the boundary.
pub fn render_guarded(route: Route, ctx: &PageContext<'_>) -> boundary::Guarded {
    boundary::guard(route.slug(), &ctx.css, || render_page(route, ctx))
}

fn render_page(route: Route, ctx: &PageContext<'_>) -> Result<Markup, RenderError> {
    let config = ctx.config;
    let form = ContactForm::from_config(&config.contact_form);

    let content = match route {
        Route::Home => {
            let about_html = render_markdown(ctx.about_md);
            if about_html.trim().is_empty() {
                return Err(RenderError::MissingContent("about text".to_string()));
            }
            html! {
                (components::hero(config))
                (components::about(&about_html))
                (components::menu_compact(categories()))
                (components::gallery(&GALLERY))
                (components::contact_section(config, &form))
            }
        }
        Route::Menu => {
            validate_menu(categories())?;
            let selector =
                MenuSelector::from_fragment(categories(), &config.navigation.menu_category)?;
            html! {
                div.page-offset { (components::menu_full(&selector)) }
            }
        }
        Route::Contact => html! {
            div.page-offset { (components::contact_section(config, &form)) }
        },
    };

    Ok(base_document(route, ctx, content))
}

fn render_markdown(source: &str) -> String {
    let parser = Parser::new(source);
    let mut body = String::new();
    md_html::push_html(&mut body, parser);
    body
}

// ============================================================================
// Document shell
// ============================================================================

const TITLE_SUFFIX: &str = "Premium Cafe in Dhaka";

pub fn page_title(route: Route, config: &SiteConfig) -> String {
    let site = &config.site;
    match route {
        Route::Home => format!("{} – {} | {}", site.name, site.tagline, TITLE_SUFFIX),
        Route::Menu => format!("Menu | {}", site.name),
        Route::Contact => format!("Contact | {}", site.name),
    }
}

fn page_scripts(route: Route) -> Vec<&'static str> {
    let mut scripts = vec![BOUNDARY_JS, NAV_JS, REVEAL_JS];
    match route {
        Route::Home => scripts.push(CONTACT_JS),
        Route::Menu => scripts.push(MENU_JS),
        Route::Contact => scripts.push(CONTACT_JS),
    }
    scripts
}

/// Renders the full HTML document around a page's content.
fn base_document(route: Route, ctx: &PageContext<'_>, content: Markup) -> Markup {
    let config = ctx.config;
    let site = &config.site;
    let title = page_title(route, config);
    let canonical = format!("{}{}", site.url, route.path());
    let og_image = format!("{}/og-image.jpg", site.url);
    let nav = NavState::new(route, NavSettings::from_config(&config.navigation));

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                meta name="description" content=(site.description);
                meta name="robots" content="index, follow";
                link rel="canonical" href=(canonical);
                meta property="og:type" content="website";
                meta property="og:locale" content="en_US";
                meta property="og:url" content=(canonical);
                meta property="og:site_name" content=(site.name);
                meta property="og:title" content=(title);
                meta property="og:description" content=(site.description);
                meta property="og:image" content=(og_image);
                meta name="twitter:card" content="summary_large_image";
                link rel="icon" href="/favicon.ico" sizes="any";
                link rel="icon" type="image/png" sizes="32x32" href="/favicon-32x32.png";
                link rel="icon" type="image/png" sizes="16x16" href="/favicon-16x16.png";
                link rel="apple-touch-icon" href="/apple-touch-icon.png";
                link rel="manifest" href={ "/" (WEB_MANIFEST) };
                meta name="theme-color" content=(config.colors.ink);
                style { (PreEscaped(&ctx.css)) }
                @if route == Route::Home {
                    script type="application/ld+json" { (PreEscaped(structured_data(config))) }
                }
            }
            body data-route=(route.slug()) {
                a.skip-link href="#main-content" { "Skip to main content" }
                (components::navbar(config, &nav))
                main #main-content {
                    (content)
                }
                (components::footer(config))
                (components::whatsapp_button(config))
                (boundary::fallback_template())
                @for script in page_scripts(route) {
                    script { (PreEscaped(script)) }
                }
            }
        }
    }
}

/// schema.org `Restaurant` document for the home page.
pub fn structured_data(config: &SiteConfig) -> String {
    let site = &config.site;
    let contact = &config.contact;
    let value = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "Restaurant",
        "name": site.name,
        "image": format!("{}/og-image.jpg", site.url),
        "@id": site.url,
        "url": site.url,
        "telephone": contact.phone,
        "email": contact.email,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": contact.address,
            "addressLocality": "Dhaka",
            "addressRegion": "Dhaka",
            "addressCountry": "BD"
        },
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": "23.7505",
            "longitude": "90.3759"
        },
        "openingHoursSpecification": [{
            "@type": "OpeningHoursSpecification",
            "dayOfWeek": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"],
            "opens": "11:00",
            "closes": "23:00"
        }],
        "servesCuisine": ["Coffee", "Pan Asian", "Chinese Fusion", "Desserts"],
        "priceRange": "$$",
        "sameAs": [config.social.facebook, config.social.instagram],
        "description": site.description
    });
    // Keep `</script>` in a value from closing the tag early.
    value.to_string().replace("</", "<\\/")
}

// ============================================================================
// Web manifest
// ============================================================================

#[derive(Debug, Serialize)]
struct ManifestIcon {
    src: &'static str,
    sizes: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct WebManifest {
    name: String,
    short_name: String,
    description: String,
    start_url: &'static str,
    display: &'static str,
    background_color: String,
    theme_color: String,
    icons: Vec<ManifestIcon>,
}

impl WebManifest {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            name: format!("{} – {}", config.site.name, config.site.tagline),
            short_name: config.site.name.clone(),
            description: config.site.description.clone(),
            start_url: "/",
            display: "standalone",
            background_color: config.colors.surface.clone(),
            theme_color: config.colors.ink.clone(),
            icons: vec![
                ManifestIcon {
                    src: "/icon-192.png",
                    sizes: "192x192",
                    kind: "image/png",
                },
                ManifestIcon {
                    src: "/icon-512.png",
                    sizes: "512x512",
                    kind: "image/png",
                },
            ],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
