//! # Bloomsberry
//!
//! Static site generator for the Bloomsberry café website. Three pages (home,
//! menu, contact) are rendered to plain HTML with the stylesheet and a handful
//! of vanilla scripts inlined, and the site's icons and optimized images are
//! prepared from the source artwork at build time.
//!
//! # Architecture: Two Independent Stages
//!
//! ```text
//! 1. Assets   public/      →  dist/          (icons, AVIF images, copied originals)
//! 2. Pages    config.toml  →  dist/**.html   (home, menu, contact, error page)
//! ```
//!
//! The stages share nothing but the output directory, so `bloomsberry pages`
//! can be rerun while editing copy without touching a single image.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, stock defaults, validation, palette CSS |
//! | [`menu`] | Static menu data, validation, and the category selector |
//! | [`nav`] | Routes, nav links, and the scroll-state tracker behind the navbar |
//! | [`contact`] | Contact form state machine, transport seam, WhatsApp links |
//! | [`components`] | Maud components: navbar, hero, about, gallery, menu, contact, footer |
//! | [`boundary`] | Error boundary that swaps a failed page for the fallback screen |
//! | [`generate`] | Stage 2: page assembly and file output |
//! | [`assets`] | Stage 1: icon cropping, image optimization, original copies |
//! | [`imaging`] | Pure-Rust image operations behind the [`imaging::ImageBackend`] trait |
//! | [`cache`] | Content-hash cache that lets unchanged images skip re-encoding |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! Markup is built with [Maud](https://maud.lambda.xyz/): malformed HTML is a
//! compile error, interpolation is escaped by default, and there is no template
//! directory to ship. Components are plain functions returning `Markup`.
//!
//! ## Interactivity Without a Framework
//!
//! Scroll progress, section highlighting, the mobile sheet, menu tabs and the
//! contact form are small scripts under `static/`. The rules they follow live
//! in Rust ([`nav::NavState`], [`menu::MenuSelector`], [`contact::ContactForm`])
//! and the rendered markup carries the initial state as `data-*` attributes,
//! so a page with scripts disabled is still complete and readable.
//!
//! ## All-or-Nothing Pages
//!
//! Every page goes through [`boundary::guard`]. A renderer that errors or
//! panics produces the fallback screen for that page and never a partial one.

pub mod assets;
pub mod boundary;
pub mod cache;
pub mod components;
pub mod config;
pub mod contact;
pub mod generate;
pub mod imaging;
pub mod menu;
pub mod nav;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
