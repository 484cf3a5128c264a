//! Presentational components.
//!
//! Each component is a pure function from typed input to [`Markup`]. Pages in
//! [`crate::generate`] compose them; nothing here touches the filesystem.
//!
//! Scroll-in animations are declarative: an element carries `data-reveal`
//! plus its timing as CSS custom properties (see [`Reveal`]), and
//! `reveal.js` adds `.is-visible` once it enters the viewport.

use crate::config::{ContactInfo, SiteConfig};
use crate::contact::{ContactForm, Field, FormStatus, whatsapp_url};
use crate::menu::{CategoryIcon, MenuCategory, MenuItem, MenuSelector, summaries};
use crate::nav::{
    FOOTER_LINKS, LEFT_LINKS, LinkTarget, NavLink, NavState, RIGHT_LINKS, Route, Section,
};
use maud::{Markup, PreEscaped, html};

// ============================================================================
// Reveal animation parameters
// ============================================================================

/// Where a revealed element slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealFrom {
    Below,
    Left,
    Right,
    /// Fade and scale only.
    Center,
}

impl RevealFrom {
    pub fn as_str(self) -> &'static str {
        match self {
            RevealFrom::Below => "up",
            RevealFrom::Left => "left",
            RevealFrom::Right => "right",
            RevealFrom::Center => "zoom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub from: RevealFrom,
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub distance_px: u32,
}

impl Reveal {
    pub const fn up(delay_ms: u32) -> Self {
        Self {
            from: RevealFrom::Below,
            delay_ms,
            duration_ms: 800,
            distance_px: 30,
        }
    }

    pub const fn from_left(delay_ms: u32) -> Self {
        Self {
            from: RevealFrom::Left,
            delay_ms,
            duration_ms: 800,
            distance_px: 50,
        }
    }

    pub const fn from_right(delay_ms: u32) -> Self {
        Self {
            from: RevealFrom::Right,
            delay_ms,
            duration_ms: 800,
            distance_px: 50,
        }
    }

    pub const fn zoom(delay_ms: u32) -> Self {
        Self {
            from: RevealFrom::Center,
            delay_ms,
            duration_ms: 700,
            distance_px: 0,
        }
    }

    /// Following element in a staggered group.
    pub const fn stagger(self, index: u32, step_ms: u32) -> Self {
        Self {
            delay_ms: self.delay_ms + index * step_ms,
            ..self
        }
    }

    /// Inline `style` value read by `site.css`.
    pub fn style(&self) -> String {
        format!(
            "--reveal-delay: {}ms; --reveal-duration: {}ms; --reveal-distance: {}px",
            self.delay_ms, self.duration_ms, self.distance_px
        )
    }
}

// ============================================================================
// Icons
// ============================================================================

/// Inline SVG icons, 24×24 stroke glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Coffee,
    GlassWater,
    Utensils,
    Cake,
    Facebook,
    Instagram,
    WhatsApp,
    Phone,
    MapPin,
    Clock,
    Mail,
    Camera,
    Star,
    Leaf,
    ChevronDown,
    ArrowRight,
    Send,
    Menu,
    Close,
}

impl Glyph {
    fn paths(self) -> &'static str {
        match self {
            Glyph::Coffee => {
                r#"<path d="M10 2v2"/><path d="M14 2v2"/><path d="M6 2v2"/><path d="M16 8a1 1 0 0 1 1 1v8a4 4 0 0 1-4 4H7a4 4 0 0 1-4-4V9a1 1 0 0 1 1-1h14a4 4 0 1 1 0 8h-1"/>"#
            }
            Glyph::GlassWater => {
                r#"<path d="M5.12 4.1A1 1 0 0 1 6.11 3h11.78a1 1 0 0 1 .99 1.1L17.19 20.2A2 2 0 0 1 15.2 22H8.8a2 2 0 0 1-2-1.8z"/><path d="M6 12a5 5 0 0 1 6 0 5 5 0 0 0 6 0"/>"#
            }
            Glyph::Utensils => {
                r#"<path d="M3 2v7c0 1.1.9 2 2 2h4a2 2 0 0 0 2-2V2"/><path d="M7 2v20"/><path d="M21 15V2a5 5 0 0 0-5 5v6c0 1.1.9 2 2 2h3Zm0 0v7"/>"#
            }
            Glyph::Cake => {
                r#"<path d="M20 21v-8a2 2 0 0 0-2-2H6a2 2 0 0 0-2 2v8"/><path d="M4 16s.5-1 2-1 2.5 2 4 2 2.5-2 4-2 2.5 2 4 2 2-1 2-1"/><path d="M2 21h20"/><path d="M7 8v3"/><path d="M12 8v3"/><path d="M17 8v3"/>"#
            }
            Glyph::Facebook => {
                r#"<path d="M18 2h-3a5 5 0 0 0-5 5v3H7v4h3v8h4v-8h3l1-4h-4V7a1 1 0 0 1 1-1h3z"/>"#
            }
            Glyph::Instagram => {
                r#"<rect width="20" height="20" x="2" y="2" rx="5" ry="5"/><path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z"/><line x1="17.5" x2="17.51" y1="6.5" y2="6.5"/>"#
            }
            Glyph::WhatsApp => {
                r#"<path d="M7.9 20A9 9 0 1 0 4 16.1L2 22Z"/><path d="M9 10a.5.5 0 0 0 1 0V9a.5.5 0 0 0-1 0v1a5 5 0 0 0 5 5h1a.5.5 0 0 0 0-1h-1a.5.5 0 0 0 0 1"/>"#
            }
            Glyph::Phone => {
                r#"<path d="M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72 12.84 12.84 0 0 0 .7 2.81 2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45 12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z"/>"#
            }
            Glyph::MapPin => {
                r#"<path d="M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z"/><circle cx="12" cy="10" r="3"/>"#
            }
            Glyph::Clock => {
                r#"<circle cx="12" cy="12" r="10"/><polyline points="12 6 12 12 16 14"/>"#
            }
            Glyph::Mail => {
                r#"<rect width="20" height="16" x="2" y="4" rx="2"/><path d="m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"/>"#
            }
            Glyph::Camera => {
                r#"<path d="M14.5 4h-5L7 7H4a2 2 0 0 0-2 2v9a2 2 0 0 0 2 2h16a2 2 0 0 0 2-2V9a2 2 0 0 0-2-2h-3l-2.5-3z"/><circle cx="12" cy="13" r="3"/>"#
            }
            Glyph::Star => {
                r#"<polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2"/>"#
            }
            Glyph::Leaf => {
                r#"<path d="M11 20A7 7 0 0 1 9.8 6.1C15.5 5 17 4.48 19 2c1 2 2 4.18 2 8 0 5.5-4.78 10-10 10Z"/><path d="M2 21c0-3 1.85-5.36 5.08-6C9.5 14.52 12 13 13 12"/>"#
            }
            Glyph::ChevronDown => r#"<path d="m6 9 6 6 6-6"/>"#,
            Glyph::ArrowRight => r#"<path d="M5 12h14"/><path d="m12 5 7 7-7 7"/>"#,
            Glyph::Send => r#"<path d="m22 2-7 20-4-9-9-4Z"/><path d="M22 2 11 13"/>"#,
            Glyph::Menu => {
                r#"<line x1="4" x2="20" y1="6" y2="6"/><line x1="4" x2="20" y1="12" y2="12"/><line x1="4" x2="20" y1="18" y2="18"/>"#
            }
            Glyph::Close => r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#,
        }
    }
}

pub fn glyph(glyph: Glyph) -> Markup {
    html! {
        svg.icon xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none"
            stroke="currentColor" stroke-width="2" stroke-linecap="round"
            stroke-linejoin="round" aria-hidden="true" {
            (PreEscaped(glyph.paths()))
        }
    }
}

pub fn category_glyph(icon: CategoryIcon) -> Glyph {
    match icon {
        CategoryIcon::MugHot => Glyph::Coffee,
        CategoryIcon::GlassWater => Glyph::GlassWater,
        CategoryIcon::Utensils => Glyph::Utensils,
        CategoryIcon::CakeCandles => Glyph::Cake,
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

/// An image with its AVIF encoding preferred and the original as fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteImage {
    /// File stem under the site root, e.g. `gallery-1`.
    pub stem: &'static str,
    pub alt: &'static str,
}

pub const ABOUT_IMAGE: SiteImage = SiteImage {
    stem: "about-img",
    alt: "The Art of Coffee at Bloomsberry",
};

pub const GALLERY: [SiteImage; 4] = [
    SiteImage {
        stem: "gallery-1",
        alt: "Bloomsberry Interior",
    },
    SiteImage {
        stem: "gallery-2",
        alt: "Our Signature Dish",
    },
    SiteImage {
        stem: "gallery-3",
        alt: "Coffee Art at Bloomsberry",
    },
    SiteImage {
        stem: "about-img",
        alt: "The Art of Conversation",
    },
];

fn picture(image: &SiteImage, eager: bool) -> Markup {
    html! {
        picture {
            source srcset={ "/" (image.stem) ".avif" } type="image/avif";
            img src={ "/" (image.stem) ".png" } alt=(image.alt)
                loading=(if eager { "eager" } else { "lazy" }) decoding="async";
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// `BLOOMS` + italic `BERRY`.
fn wordmark() -> Markup {
    html! {
        span.wordmark {
            span.wordmark-main { "BLOOMS" }
            em.wordmark-accent { "BERRY" }
        }
    }
}

fn social_links(config: &SiteConfig) -> Markup {
    html! {
        div.social-links {
            a.social-link href=(config.social.facebook) target="_blank" rel="noopener noreferrer"
                aria-label="Visit our Facebook page" { (glyph(Glyph::Facebook)) }
            a.social-link href=(config.social.instagram) target="_blank" rel="noopener noreferrer"
                aria-label="Visit our Instagram page" { (glyph(Glyph::Instagram)) }
        }
    }
}

fn section_heading(label: &str, title: &str, lead: Option<&str>) -> Markup {
    html! {
        header.section-heading data-reveal=(RevealFrom::Below.as_str()) style=(Reveal::up(0).style()) {
            p.section-label { span.rule {} (label) span.rule {} }
            h2 { (title) }
            @if let Some(lead) = lead {
                p.section-lead { (lead) }
            }
        }
    }
}

// ============================================================================
// Navbar
// ============================================================================

fn nav_link(link: &NavLink, state: &NavState) -> Markup {
    let section = match link.target {
        LinkTarget::Section(s) => Some(s.id()),
        LinkTarget::Page(_) => None,
    };
    let active = state.is_link_active(link);
    html! {
        a.nav-link.active[active] href=(link.href()) data-section=[section]
            aria-current=[active.then_some("page")] {
            (link.label)
        }
    }
}

/// Fixed navbar: desktop bar, mobile toggle and sheet, and the scroll
/// progress bar. Rendered in the state `state` describes; `nav.js` keeps it
/// in sync afterwards.
pub fn navbar(config: &SiteConfig, state: &NavState) -> Markup {
    let settings = state.settings();
    let route = state.route();
    let open = state.menu_open;
    let tracked: Vec<&str> = if route == Route::Home {
        Section::ALL.iter().map(|s| s.id()).collect()
    } else {
        Vec::new()
    };

    html! {
        header #navbar .navbar.solid[state.is_solid()]
            data-route=(route.slug())
            data-scroll-threshold=(format!("{}", settings.scroll_threshold))
            data-anchor=(format!("{}", settings.anchor))
            data-sections=(tracked.join(" ")) {
            div.scroll-progress aria-hidden="true"
                style=(format!("transform: scaleX({})", state.progress)) {}

            nav.nav-desktop aria-label="Primary" {
                div.nav-side.nav-left {
                    @for link in &LEFT_LINKS { (nav_link(link, state)) }
                }
                a.nav-brand href="/" {
                    (wordmark())
                    span.nav-tagline { (config.site.tagline) }
                }
                div.nav-side.nav-right {
                    @for link in &RIGHT_LINKS { (nav_link(link, state)) }
                }
            }

            div.nav-mobile {
                a.nav-brand href="/" { (wordmark()) }
                button.nav-toggle type="button" aria-controls="nav-sheet"
                    aria-expanded=(flag(open))
                    aria-label=(if open { "Close menu" } else { "Open menu" }) {
                    span.when-closed { (glyph(Glyph::Menu)) }
                    span.when-open { (glyph(Glyph::Close)) }
                }
            }

            aside #nav-sheet .nav-sheet.open[open] hidden[!open] {
                div.sheet-header {
                    (wordmark())
                    span.nav-tagline { (config.site.tagline) }
                }
                div.sheet-links {
                    @for link in LEFT_LINKS.iter().chain(RIGHT_LINKS.iter()) {
                        (nav_link(link, state))
                    }
                }
                div.sheet-social {
                    p.sheet-label { "Follow Us" }
                    (social_links(config))
                }
                div.sheet-contact {
                    a href=(config.contact.phone_href()) {
                        (glyph(Glyph::Phone)) span { (config.contact.phone) }
                    }
                    div { (glyph(Glyph::MapPin)) span { (config.contact.address) } }
                }
            }
        }
    }
}

// ============================================================================
// Home sections
// ============================================================================

pub fn hero(config: &SiteConfig) -> Markup {
    html! {
        section.hero #home {
            div.hero-backdrop aria-hidden="true" {}
            div.hero-content {
                p.hero-established data-reveal=(RevealFrom::Below.as_str()) style=(Reveal::up(100).style()) {
                    "Established " (config.site.established)
                }
                h1.hero-title {
                    span.hero-line data-reveal=(RevealFrom::Below.as_str())
                        style=(Reveal { distance_px: 40, ..Reveal::up(200) }.style()) { "The Purest" }
                    span.hero-line.hero-line-italic data-reveal=(RevealFrom::Below.as_str())
                        style=(Reveal { distance_px: 40, ..Reveal::up(400) }.style()) { "Essence of Taste" }
                }
                div.hero-rule {}
                p.hero-subtitle data-reveal=(RevealFrom::Below.as_str()) style=(Reveal::up(700).style()) {
                    "A botanical sanctuary where culinary heritage meets contemporary organic \
                     innovation. Discover the art of modern dining."
                }
                div.hero-actions data-reveal=(RevealFrom::Below.as_str())
                    style=(Reveal { duration_ms: 600, distance_px: 20, ..Reveal::up(900) }.style()) {
                    a.btn.btn-primary href="#menu" { "Explore Menu" }
                    a.btn.btn-outline href="#contact" { "Book a Table" }
                }
            }
            a.hero-scroll href="#about" aria-label="Scroll down to explore more content" {
                span { "Explore More" }
                (glyph(Glyph::ChevronDown))
            }
        }
    }
}

struct Feature {
    glyph: Glyph,
    title: &'static str,
    text: &'static str,
}

const FEATURES: [Feature; 2] = [
    Feature {
        glyph: Glyph::Star,
        title: "Unique Vibe",
        text: "Glassy, modern interior with a touch of botanical freshness.",
    },
    Feature {
        glyph: Glyph::Leaf,
        title: "Fusion Cuisine",
        text: "Specializing in Pan Asian and Chinese Fusion dishes.",
    },
];

/// About section. `body_html` is the rendered `about.md`.
pub fn about(body_html: &str) -> Markup {
    html! {
        section.about #about {
            div.container.about-grid {
                figure.about-image data-reveal=(RevealFrom::Left.as_str()) style=(Reveal::from_left(200).style()) {
                    (picture(&ABOUT_IMAGE, true))
                }
                div.about-content data-reveal=(RevealFrom::Right.as_str()) style=(Reveal::from_right(350).style()) {
                    p.section-label.section-label-left { span.rule {} "About Us" }
                    h2 { "The Art of Coffee & Conversation" }
                    div.about-body { (PreEscaped(body_html)) }
                    div.feature-grid {
                        @for (i, feature) in FEATURES.iter().enumerate() {
                            div.feature-card data-reveal=(RevealFrom::Below.as_str())
                                style=(Reveal { duration_ms: 600, distance_px: 20, ..Reveal::up(500) }.stagger(i as u32, 150).style()) {
                                div.feature-title {
                                    span.feature-icon { (glyph(feature.glyph)) }
                                    h3 { (feature.title) }
                                }
                                p { (feature.text) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn gallery(images: &[SiteImage]) -> Markup {
    html! {
        section.gallery #gallery {
            div.container {
                header.section-heading data-reveal=(RevealFrom::Below.as_str()) style=(Reveal::up(200).style()) {
                    p.section-label { span.rule {} (glyph(Glyph::Camera)) span.rule {} }
                    h2 { "Visual Story" }
                    p.section-lead {
                        "Capturing the essence of Bloomsberry through moments of coffee, \
                         conversation, and connection"
                    }
                }
                div.gallery-grid {
                    @for (i, image) in images.iter().enumerate() {
                        figure.gallery-item data-reveal=(RevealFrom::Below.as_str())
                            style=(Reveal { duration_ms: 700, distance_px: 40, ..Reveal::up(350) }.stagger(i as u32, 150).style()) {
                            (picture(image, false))
                            figcaption { (image.alt) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Menu
// ============================================================================

const MENU_LABEL: &str = "Culinary Excellence";
const MENU_TITLE: &str = "Our Menu";
const MENU_LEAD: &str = "Curated flavors crafted with passion, featuring the finest ingredients \
                         for the perfect conversation over great food and coffee";
const MENU_NOTE: &str = "Please inform our staff of any allergies or dietary requirements. \
                         Prices are subject to change. All items are prepared fresh to order.";

/// Home-page teaser: one card per category, each linking into `/menu`.
pub fn menu_compact(categories: &[MenuCategory]) -> Markup {
    html! {
        section.menu.menu-compact #menu {
            div.container {
                (section_heading(MENU_LABEL, MENU_TITLE, Some(MENU_LEAD)))
                div.menu-cards {
                    @for (i, summary) in summaries(categories).iter().enumerate() {
                        a.menu-card href={ (Route::Menu.path()) "#" (summary.id) }
                            data-reveal=(RevealFrom::Below.as_str())
                            style={ "--card-gradient: " (summary.gradient.css()) "; "
                                (Reveal::up(150).stagger(i as u32, 100).style()) } {
                            span.menu-card-icon { (glyph(category_glyph(summary.icon))) }
                            h3 { (summary.title) }
                            p { (summary.description) }
                            span.menu-card-footer {
                                span.menu-card-count { (summary.item_count) " items" }
                                span.menu-card-cta { "View Items " (glyph(Glyph::ArrowRight)) }
                            }
                        }
                    }
                }
                div.menu-more {
                    a.btn.btn-primary href=(Route::Menu.path()) { "View Full Menu" }
                    p { "Discover our complete selection of beverages and cuisine" }
                }
            }
        }
    }
}

fn menu_item(item: &MenuItem) -> Markup {
    html! {
        article.menu-item data-item=(item.id) {
            header {
                h4 { (item.name) }
                @if item.popular {
                    span.badge { "Popular" }
                }
                span.price { (item.price) }
            }
            p.menu-item-description { (item.description) }
            @if let Some(ingredients) = item.ingredients {
                p.ingredients { "Ingredients: " (ingredients) }
            }
        }
    }
}

/// Full menu: category tabs plus one panel per category. Only the active
/// panel is visible; `menu.js` swaps panels on tab clicks.
pub fn menu_full(selector: &MenuSelector<'_>) -> Markup {
    html! {
        section.menu.menu-full #menu {
            div.container {
                (section_heading(MENU_LABEL, MENU_TITLE, Some(MENU_LEAD)))
                div.menu-tabs role="tablist" aria-label="Menu categories" {
                    @for category in selector.categories() {
                        @let active = selector.is_active(category.id);
                        button.menu-tab.active[active] type="button" role="tab"
                            id={ "tab-" (category.id) }
                            data-category=(category.id)
                            aria-controls={ "panel-" (category.id) }
                            aria-selected=(flag(active)) {
                            (glyph(category_glyph(category.icon)))
                            span { (category.title) }
                        }
                    }
                }
                @for category in selector.categories() {
                    @let active = selector.is_active(category.id);
                    div.menu-panel role="tabpanel" id={ "panel-" (category.id) }
                        aria-labelledby={ "tab-" (category.id) } hidden[!active]
                        style={ "--card-gradient: " (category.gradient.css()) } {
                        header.menu-panel-header {
                            span.menu-card-icon { (glyph(category_glyph(category.icon))) }
                            h3 { (category.title) }
                            p { (category.description) }
                        }
                        div.menu-items {
                            @for item in category.items {
                                (menu_item(item))
                            }
                        }
                    }
                }
                p.menu-note { (MENU_NOTE) }
            }
        }
    }
}

// ============================================================================
// Contact
// ============================================================================

/// One row of the contact details list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetail {
    pub label: &'static str,
    pub value: String,
    pub href: Option<String>,
    /// Opens in a new tab.
    pub external: bool,
}

pub fn contact_details(info: &ContactInfo) -> Vec<ContactDetail> {
    vec![
        ContactDetail {
            label: "Address",
            value: info.address.clone(),
            href: Some(info.maps_url.clone()),
            external: true,
        },
        ContactDetail {
            label: "Hours",
            value: info.hours.clone(),
            href: None,
            external: false,
        },
        ContactDetail {
            label: "Phone",
            value: info.phone.clone(),
            href: Some(info.phone_href()),
            external: false,
        },
        ContactDetail {
            label: "Email",
            value: info.email.clone(),
            href: Some(info.email_href()),
            external: false,
        },
    ]
}

fn detail_glyph(label: &str) -> Glyph {
    match label {
        "Address" => Glyph::MapPin,
        "Hours" => Glyph::Clock,
        "Phone" => Glyph::Phone,
        _ => Glyph::Mail,
    }
}

fn form_field(form: &ContactForm, field: Field) -> Markup {
    let id = format!("contact-{}", field.name());
    html! {
        div.form-field {
            label for=(id) {
                (field.label())
                @if field.required() { span.required aria-hidden="true" { " *" } }
            }
            @match field.input_type() {
                Some(kind) => {
                    input id=(id) type=(kind) name=(field.name()) placeholder=(field.placeholder())
                        value=(form.field(field)) required[field.required()];
                }
                None => {
                    textarea id=(id) name=(field.name()) rows="4" placeholder=(field.placeholder())
                        required[field.required()] { (form.field(field)) }
                }
            }
        }
    }
}

/// The contact form in the state `form` is in. `contact.js` drives the same
/// transitions in the browser using the delays in the `data-*` attributes.
pub fn contact_form(config: &SiteConfig, form: &ContactForm) -> Markup {
    let status = form.status();
    let submitted = status == FormStatus::Submitted;
    let submitting = status == FormStatus::Submitting;
    html! {
        div.contact-form-card {
            h3 { "Send us a Message" }
            p.form-lead { "Have a question or want to make a reservation? Fill out the form below." }
            div.form-success role="status" hidden[!submitted] {
                span.form-success-icon { (glyph(Glyph::Send)) }
                h4 { "Message Sent!" }
                p { "Thank you for reaching out. We'll get back to you soon." }
            }
            form #contact-form .contact-form
                data-status=(status.as_str())
                data-submit-delay=(config.contact_form.submit_delay_ms)
                data-confirmation=(config.contact_form.confirmation_ms)
                hidden[submitted] {
                @for field in Field::ALL {
                    (form_field(form, field))
                }
                button.btn.btn-primary.btn-block type="submit" disabled[submitting] {
                    span.when-idle { (glyph(Glyph::Send)) " Send Message" }
                    span.when-submitting { "Sending..." }
                }
            }
        }
    }
}

pub fn contact_section(config: &SiteConfig, form: &ContactForm) -> Markup {
    let info = &config.contact;
    html! {
        section.contact #contact {
            div.container {
                (section_heading(
                    "Get In Touch",
                    "Visit Us",
                    Some("Come for the coffee, stay for the conversation. We'd love to hear from you!"),
                ))
                div.contact-grid {
                    div.contact-info data-reveal=(RevealFrom::Left.as_str()) style=(Reveal::from_left(200).style()) {
                        ul.contact-details {
                            @for detail in contact_details(info) {
                                li {
                                    span.detail-icon { (glyph(detail_glyph(detail.label))) }
                                    div {
                                        h4 { (detail.label) }
                                        @match &detail.href {
                                            Some(href) if detail.external => {
                                                a href=(href) target="_blank" rel="noopener noreferrer" { (detail.value) }
                                            }
                                            Some(href) => { a href=(href) { (detail.value) } }
                                            None => { p { (detail.value) } }
                                        }
                                    }
                                }
                            }
                        }
                        div.map-frame {
                            iframe src=(info.map_embed_url) title="Bloomsberry location"
                                width="100%" height="400" loading="lazy" allowfullscreen
                                referrerpolicy="no-referrer-when-downgrade" {}
                        }
                        a.directions href=(info.maps_url) target="_blank" rel="noopener noreferrer" {
                            (glyph(Glyph::MapPin)) " Get Directions " (glyph(Glyph::ArrowRight))
                        }
                    }
                    div.contact-actions data-reveal=(RevealFrom::Right.as_str()) style=(Reveal::from_right(350).style()) {
                        (contact_form(config, form))
                        a.whatsapp-card href=(whatsapp_url(&info.whatsapp_number, &info.whatsapp_message))
                            target="_blank" rel="noopener noreferrer" {
                            span.whatsapp-card-icon { (glyph(Glyph::WhatsApp)) }
                            div {
                                h4 { "Chat on WhatsApp" }
                                p { "Quick response for reservations" }
                            }
                            span.btn.btn-light { "Message Us" }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Footer and floating button
// ============================================================================

pub fn footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            div.container {
                div.footer-frame {
                    h2.footer-brand { (config.site.name) }
                    nav.footer-nav aria-label="Footer" {
                        ul {
                            @for (label, href) in FOOTER_LINKS {
                                li { a href=(href) { (label) } }
                            }
                        }
                    }
                    (social_links(config))
                    div.footer-bottom {
                        p.copyright { "© 2026 " (config.site.name) ". All Rights Reserved." }
                        div.footer-actions {
                            a.btn.btn-ghost href=(Route::Menu.path()) { "Order Online" }
                            a.btn.btn-ghost href=(Route::Contact.path()) { "Reservation" }
                        }
                    }
                }
            }
        }
    }
}

pub fn whatsapp_button(config: &SiteConfig) -> Markup {
    html! {
        a.whatsapp-float href=(whatsapp_url(&config.contact.whatsapp_number, ""))
            target="_blank" rel="noopener noreferrer" aria-label="Chat on WhatsApp" {
            (glyph(Glyph::WhatsApp))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::categories;
    use crate::nav::{NavSettings, ScrollSample, SectionBox};
    use std::time::Duration;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    // =========================================================================
    // Reveal
    // =========================================================================

    #[test]
    fn reveal_style_lists_custom_properties() {
        assert_eq!(
            Reveal::up(200).style(),
            "--reveal-delay: 200ms; --reveal-duration: 800ms; --reveal-distance: 30px"
        );
    }

    #[test]
    fn reveal_stagger_offsets_delay() {
        let third = Reveal::zoom(100).stagger(2, 150);
        assert_eq!(third.delay_ms, 400);
        assert_eq!(third.from, RevealFrom::Center);
    }

    // =========================================================================
    // Navbar
    // =========================================================================

    #[test]
    fn navbar_transparent_at_top_of_home() {
        let config = SiteConfig::default();
        let state = NavState::new(Route::Home, NavSettings::default());
        let html = navbar(&config, &state).into_string();
        assert!(html.contains(r#"class="navbar""#));
        assert!(html.contains(r#"data-sections="about gallery contact""#));
        assert!(html.contains(r#"data-scroll-threshold="50""#));
        assert!(html.contains(r#"data-anchor="150""#));
        assert!(!html.contains("nav-link active"));
    }

    #[test]
    fn navbar_solid_off_home_with_page_link_active() {
        let config = SiteConfig::default();
        let state = NavState::new(Route::Menu, NavSettings::default());
        let html = navbar(&config, &state).into_string();
        assert!(html.contains(r#"class="navbar solid""#));
        assert!(html.contains(r#"data-route="menu""#));
        assert!(html.contains(r#"data-sections="""#));
        // Desktop and mobile sheet each render the link once.
        assert_eq!(
            count(&html, r#"<a class="nav-link active" href="/menu""#),
            2
        );
        assert_eq!(count(&html, "nav-link active"), 2);
    }

    #[test]
    fn navbar_reflects_observed_section() {
        let config = SiteConfig::default();
        let mut state = NavState::new(Route::Home, NavSettings::default());
        state.observe(&ScrollSample {
            offset: 1200.0,
            document_height: 5000.0,
            viewport_height: 1000.0,
            sections: vec![SectionBox {
                section: Section::Gallery,
                top: 100.0,
                bottom: 700.0,
            }],
        });
        let html = navbar(&config, &state).into_string();
        assert!(html.contains(r#"class="navbar solid""#));
        assert!(html.contains(r##"<a class="nav-link active" href="/#gallery" data-section="gallery""##));
        assert!(html.contains("scaleX(0.3)"));
    }

    #[test]
    fn navbar_sheet_hidden_until_opened() {
        let config = SiteConfig::default();
        let mut state = NavState::new(Route::Home, NavSettings::default());
        let closed = navbar(&config, &state).into_string();
        assert!(closed.contains(r#"aria-expanded="false""#));
        assert!(closed.contains(" hidden"));

        state.toggle_menu();
        let open = navbar(&config, &state).into_string();
        assert!(open.contains(r#"class="nav-sheet open""#));
        assert!(!open.contains(" hidden"));
        assert!(open.contains(r#"aria-label="Close menu""#));
        assert!(open.contains("Follow Us"));
    }

    // =========================================================================
    // Sections
    // =========================================================================

    #[test]
    fn hero_shows_established_year() {
        let mut config = SiteConfig::default();
        config.site.established = 2031;
        let html = hero(&config).into_string();
        assert!(html.contains("Established 2031"));
        assert!(html.contains("Explore Menu"));
        assert!(html.contains("Book a Table"));
    }

    #[test]
    fn about_embeds_body_html() {
        let html = about("<p>Hello <strong>Dhanmondi</strong></p>").into_string();
        assert!(html.contains("<p>Hello <strong>Dhanmondi</strong></p>"));
        assert!(html.contains("Unique Vibe"));
        assert!(html.contains("Fusion Cuisine"));
    }

    #[test]
    fn gallery_prefers_avif_with_png_fallback() {
        let html = gallery(&GALLERY).into_string();
        assert!(html.contains(r#"<source srcset="/gallery-1.avif" type="image/avif">"#));
        assert!(html.contains(r#"src="/gallery-1.png""#));
        assert!(html.contains("Coffee Art at Bloomsberry"));
        assert_eq!(count(&html, "<figure"), 4);
    }

    #[test]
    fn compact_menu_shows_counts_and_links() {
        let html = menu_compact(categories()).into_string();
        assert!(html.contains(r##"href="/menu#coffee""##));
        assert!(html.contains("8 items"));
        assert!(html.contains("6 items"));
        assert!(html.contains("View Full Menu"));
        // No items or tabs in the compact view.
        assert!(!html.contains("menu-tab"));
        assert!(!html.contains("Classic Espresso"));
    }

    #[test]
    fn full_menu_shows_only_active_panel() {
        let mut selector = MenuSelector::new(categories()).unwrap();
        selector.select("desserts").unwrap();
        let html = menu_full(&selector).into_string();

        assert_eq!(count(&html, r#"role="tabpanel""#), 4);
        assert_eq!(count(&html, " hidden"), 3);
        assert!(html.contains(r#"<div class="menu-panel" role="tabpanel" id="panel-desserts" aria-labelledby="tab-desserts" style"#));
        assert!(html.contains(r#"aria-selected="true""#));
        assert_eq!(count(&html, r#"aria-selected="true""#), 1);
        assert!(html.contains("Popular"));
        assert!(html.contains("Ingredients: "));
        assert!(html.contains(MENU_NOTE));
    }

    #[test]
    fn category_icons_are_distinct() {
        let icons: Vec<String> = categories()
            .iter()
            .map(|c| glyph(category_glyph(c.icon)).into_string())
            .collect();
        for (i, a) in icons.iter().enumerate() {
            for b in &icons[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    // =========================================================================
    // Contact
    // =========================================================================

    #[test]
    fn contact_details_link_targets() {
        let details = contact_details(&ContactInfo::default());
        let labels: Vec<&str> = details.iter().map(|d| d.label).collect();
        assert_eq!(labels, vec!["Address", "Hours", "Phone", "Email"]);
        assert!(details[0].external);
        assert_eq!(details[1].href, None);
        assert_eq!(details[2].href.as_deref(), Some("tel:01934-472047"));
        assert_eq!(
            details[3].href.as_deref(),
            Some("mailto:bloomsberrybd@gmail.com")
        );
    }

    #[test]
    fn idle_form_marks_required_fields() {
        let config = SiteConfig::default();
        let form = ContactForm::from_config(&config.contact_form);
        let html = contact_form(&config, &form).into_string();
        assert_eq!(count(&html, " required"), 3);
        assert!(html.contains(r#"data-status="idle""#));
        assert!(html.contains(r#"data-submit-delay="1500""#));
        assert!(html.contains(r#"data-confirmation="5000""#));
        assert!(html.contains(r#"<textarea id="contact-message""#));
    }

    #[test]
    fn form_renders_current_values() {
        let config = SiteConfig::default();
        let mut form = ContactForm::new(Duration::from_secs(5));
        form.set_field(Field::Name, "Rafi <3");
        let html = contact_form(&config, &form).into_string();
        assert!(html.contains(r#"value="Rafi &lt;3""#));
    }

    #[tokio::test]
    async fn submitted_form_shows_confirmation() {
        use crate::contact::SimulatedTransport;

        let config = SiteConfig::default();
        let mut form = ContactForm::new(Duration::from_secs(5));
        form.set_field(Field::Name, "Rafi");
        form.set_field(Field::Email, "rafi@example.com");
        form.set_field(Field::Message, "Hi");
        form.submit(&SimulatedTransport::new(Duration::ZERO))
            .await
            .unwrap();

        let html = contact_form(&config, &form).into_string();
        assert!(html.contains(r#"<div class="form-success" role="status">"#));
        assert!(html.contains(r#"data-status="submitted""#));
    }

    #[test]
    fn contact_section_links_whatsapp_with_message() {
        let config = SiteConfig::default();
        let form = ContactForm::from_config(&config.contact_form);
        let html = contact_section(&config, &form).into_string();
        assert!(html.contains("https://wa.me/8801934472047?text=Hello%20Bloomsberry!"));
        assert!(html.contains("Get Directions"));
        assert!(html.contains("Visit Us"));
    }

    // =========================================================================
    // Footer
    // =========================================================================

    #[test]
    fn footer_lists_quick_links() {
        let html = footer(&SiteConfig::default()).into_string();
        for (label, _) in FOOTER_LINKS {
            assert!(html.contains(label));
        }
        assert!(html.contains("© 2026 Bloomsberry. All Rights Reserved."));
    }

    #[test]
    fn whatsapp_button_has_plain_chat_link() {
        let html = whatsapp_button(&SiteConfig::default()).into_string();
        assert!(html.contains(r#"href="https://wa.me/8801934472047""#));
        assert!(html.contains(r#"aria-label="Chat on WhatsApp""#));
    }
}
