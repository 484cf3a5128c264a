//! Render error boundary.
//!
//! Every page render runs through [`guard`]. If the renderer returns an error
//! or panics, the fault is logged and the whole page is replaced by the fixed
//! fallback screen. A page is either rendered completely or not at all.
//!
//! The same fallback markup ships inside a `<template>` on every page so that
//! `boundary.js` can swap it in when a script fails in the browser.

use crate::menu::MenuError;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("missing content: {0}")]
    MissingContent(String),
    #[error("menu error: {0}")]
    Menu(#[from] MenuError),
    #[error("renderer panicked: {0}")]
    Panicked(String),
}

pub const FALLBACK_TITLE: &str = "Oops! Something went wrong";
pub const FALLBACK_MESSAGE: &str = "We apologize for the inconvenience. Please try refreshing \
                                    the page or contact us if the problem persists.";
pub const FALLBACK_ACTION: &str = "Refresh Page";

/// Result of a guarded render.
#[derive(Debug)]
pub struct Guarded {
    pub markup: Markup,
    /// Set when the fallback was substituted.
    pub failed: Option<RenderError>,
}

impl Guarded {
    pub fn is_fallback(&self) -> bool {
        self.failed.is_some()
    }
}

/// Run `render`; on error or panic, log and substitute [`fallback_page`].
pub fn guard<F>(page: &str, css: &str, render: F) -> Guarded
where
    F: FnOnce() -> Result<Markup, RenderError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(render))
        .unwrap_or_else(|payload| Err(RenderError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
        Ok(markup) => Guarded {
            markup,
            failed: None,
        },
        Err(e) => {
            tracing::error!(page, error = %e, "render failed, substituting fallback page");
            Guarded {
                markup: fallback_page(css),
                failed: Some(e),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

const WARNING_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z"/></svg>"#;
const REFRESH_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 4v5h.582m15.356 2A8.001 8.001 0 004.582 9m0 0H9m11 11v-5h-.581m0 0a8.003 8.003 0 01-15.357-2m15.357 2H15"/></svg>"#;

/// The fallback screen's content.
pub fn fallback_body() -> Markup {
    html! {
        div.fallback role="alert" {
            div.fallback-card {
                div.fallback-icon { (PreEscaped(WARNING_ICON)) }
                h1 { (FALLBACK_TITLE) }
                p { (FALLBACK_MESSAGE) }
                button.btn.btn-primary type="button" onclick="window.location.reload()" {
                    (PreEscaped(REFRESH_ICON))
                    (FALLBACK_ACTION)
                }
            }
        }
    }
}

/// Fallback wrapped for `boundary.js`.
pub fn fallback_template() -> Markup {
    html! {
        template #error-boundary { (fallback_body()) }
    }
}

/// Complete standalone fallback document. Also written as `error.html`.
pub fn fallback_page(css: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { (FALLBACK_TITLE) }
                style { (PreEscaped(css)) }
            }
            body.fallback-view {
                (fallback_body())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_render_passes_through() {
        let guarded = guard("home", "", || Ok(html! { p { "hello" } }));
        assert!(!guarded.is_fallback());
        assert_eq!(guarded.markup.into_string(), "<p>hello</p>");
    }

    #[test]
    fn error_yields_fallback_page() {
        let guarded = guard("menu", "", || {
            Err(RenderError::MissingContent("about text".into()))
        });
        assert!(matches!(
            guarded.failed,
            Some(RenderError::MissingContent(_))
        ));
        let html = guarded.markup.into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(FALLBACK_TITLE));
        assert!(html.contains(FALLBACK_ACTION));
    }

    #[test]
    fn panic_yields_fallback_page() {
        let guarded = guard("contact", "", || -> Result<Markup, RenderError> {
            panic!("section table empty")
        });
        match guarded.failed {
            Some(RenderError::Panicked(msg)) => assert_eq!(msg, "section table empty"),
            other => panic!("expected panic capture, got {other:?}"),
        }
        assert!(guarded.markup.into_string().contains(FALLBACK_TITLE));
    }

    #[test]
    fn formatted_panic_message_is_captured() {
        let guarded = guard("home", "", || -> Result<Markup, RenderError> {
            panic!("bad index {}", 7)
        });
        assert!(matches!(
            guarded.failed,
            Some(RenderError::Panicked(ref m)) if m == "bad index 7"
        ));
    }

    #[test]
    fn fallback_never_contains_partial_output() {
        let guarded = guard("home", "", || {
            let _partial = html! { h1 { "Half a page" } };
            Err(RenderError::Menu(MenuError::Empty))
        });
        assert!(!guarded.markup.into_string().contains("Half a page"));
    }

    #[test]
    fn template_wraps_same_body() {
        let template = fallback_template().into_string();
        assert!(template.starts_with(r#"<template id="error-boundary">"#));
        assert!(template.contains(&fallback_body().into_string()));
    }

    #[test]
    fn fallback_page_inlines_css() {
        let html = fallback_page(".fallback { color: red; }").into_string();
        assert!(html.contains(".fallback { color: red; }"));
        assert!(html.contains(r#"class="fallback-view""#));
    }
}
