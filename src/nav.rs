//! Routes, navigation links, and the navbar's scroll state.
//!
//! The navbar reacts to scrolling in three ways:
//!
//! - it turns solid once the page is scrolled past a threshold (and is always
//!   solid off the home page);
//! - a thin bar at the top shows how far down the page the reader is;
//! - on the home page, the link for the section under the anchor line is
//!   highlighted.
//!
//! [`NavState`] holds these as a single value recomputed from each
//! [`ScrollSample`]. The generated `nav.js` applies the same rules in the
//! browser, reading its thresholds from `data-*` attributes written from
//! [`NavSettings`].

use crate::config::NavigationConfig;

/// A generated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Menu,
    Contact,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Menu, Route::Contact];

    /// URL path, as used in links.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Menu => "/menu",
            Route::Contact => "/contact",
        }
    }

    /// File written for this route, relative to the output directory.
    pub fn output_file(self) -> &'static str {
        match self {
            Route::Home => "index.html",
            Route::Menu => "menu/index.html",
            Route::Contact => "contact/index.html",
        }
    }

    /// Resolve a URL path. Trailing slashes, `index.html`, query strings and
    /// fragments are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.strip_suffix("index.html").unwrap_or(path);
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/menu" => Some(Route::Menu),
            "/contact" => Some(Route::Contact),
            _ => None,
        }
    }

    /// Short name used for the `data-route` attribute.
    pub fn slug(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Menu => "menu",
            Route::Contact => "contact",
        }
    }
}

/// A home-page section the navbar can highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Gallery,
    Contact,
}

impl Section {
    /// Tracking order. The first straddling section wins.
    pub const ALL: [Section; 3] = [Section::About, Section::Gallery, Section::Contact];

    pub fn id(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Gallery => "gallery",
            Section::Contact => "contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }

    /// The standalone page showing this section, if any.
    pub fn page(self) -> Option<Route> {
        match self {
            Section::Contact => Some(Route::Contact),
            Section::About | Section::Gallery => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// An anchor on the home page (`/#about`).
    Section(Section),
    Page(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: LinkTarget,
}

impl NavLink {
    pub fn href(&self) -> String {
        match self.target {
            LinkTarget::Section(section) => format!("/#{}", section.id()),
            LinkTarget::Page(route) => route.path().to_string(),
        }
    }

    /// The page this link counts as "current" on, off the home route.
    pub fn page(&self) -> Option<Route> {
        match self.target {
            LinkTarget::Section(section) => section.page(),
            LinkTarget::Page(route) => Some(route),
        }
    }
}

/// Links left of the centered logo.
pub const LEFT_LINKS: [NavLink; 2] = [
    NavLink {
        label: "Origins",
        target: LinkTarget::Section(Section::About),
    },
    NavLink {
        label: "Menu",
        target: LinkTarget::Page(Route::Menu),
    },
];

/// Links right of the centered logo.
pub const RIGHT_LINKS: [NavLink; 2] = [
    NavLink {
        label: "Visuals",
        target: LinkTarget::Section(Section::Gallery),
    },
    NavLink {
        label: "Contact",
        target: LinkTarget::Section(Section::Contact),
    },
];

/// All navbar links, left to right.
pub fn nav_links() -> impl Iterator<Item = &'static NavLink> {
    LEFT_LINKS.iter().chain(RIGHT_LINKS.iter())
}

/// Footer quick links: label and href.
pub const FOOTER_LINKS: [(&str, &str); 5] = [
    ("Home", "/"),
    ("About Us", "/#about"),
    ("Our Menus", "/menu"),
    ("Locate", "/contact"),
    ("Contact", "/contact"),
];

/// Scroll tracking thresholds, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavSettings {
    pub scroll_threshold: f64,
    pub anchor: f64,
}

impl NavSettings {
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            scroll_threshold: f64::from(config.scroll_threshold),
            anchor: f64::from(config.anchor_offset),
        }
    }
}

impl Default for NavSettings {
    fn default() -> Self {
        Self::from_config(&NavigationConfig::default())
    }
}

/// A section's bounding box relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBox {
    pub section: Section,
    pub top: f64,
    pub bottom: f64,
}

impl SectionBox {
    pub fn straddles(&self, anchor: f64) -> bool {
        self.top <= anchor && self.bottom >= anchor
    }
}

/// One scroll/resize observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollSample {
    pub offset: f64,
    pub document_height: f64,
    pub viewport_height: f64,
    /// Boxes of the sections present on the page, in any order.
    pub sections: Vec<SectionBox>,
}

/// Fraction of the scrollable height already scrolled, in `[0, 1]`.
///
/// Zero when the page does not scroll.
pub fn scroll_progress(offset: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 || offset.is_nan() {
        return 0.0;
    }
    (offset / scrollable).clamp(0.0, 1.0)
}

/// The first section, in [`Section::ALL`] order, whose box straddles `anchor`.
pub fn find_active_section(sections: &[SectionBox], anchor: f64) -> Option<Section> {
    Section::ALL.into_iter().find(|section| {
        sections
            .iter()
            .any(|b| b.section == *section && b.straddles(anchor))
    })
}

/// The navbar's state on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    route: Route,
    settings: NavSettings,
    pub scrolled: bool,
    pub active_section: Option<Section>,
    pub menu_open: bool,
    pub progress: f64,
}

impl NavState {
    pub fn new(route: Route, settings: NavSettings) -> Self {
        Self {
            route,
            settings,
            scrolled: false,
            active_section: None,
            menu_open: false,
            progress: 0.0,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn settings(&self) -> NavSettings {
        self.settings
    }

    /// Recompute from a scroll sample.
    ///
    /// The active section only moves on the home page, and keeps its last
    /// value while no section straddles the anchor (e.g. over the hero or
    /// between sections).
    pub fn observe(&mut self, sample: &ScrollSample) {
        self.scrolled = sample.offset > self.settings.scroll_threshold;
        self.progress = scroll_progress(
            sample.offset,
            sample.document_height,
            sample.viewport_height,
        );
        if self.route == Route::Home
            && let Some(section) = find_active_section(&sample.sections, self.settings.anchor)
        {
            self.active_section = Some(section);
        }
    }

    /// Solid background: scrolled, or not on the home page.
    pub fn is_solid(&self) -> bool {
        self.scrolled || self.route != Route::Home
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Follow a link: closes the mobile menu and returns where to go.
    pub fn follow(&mut self, link: &NavLink) -> String {
        self.close_menu();
        link.href()
    }

    /// Home: a section link is active iff its section is the active one.
    /// Elsewhere: a link is active iff its page is the current route.
    pub fn is_link_active(&self, link: &NavLink) -> bool {
        if self.route == Route::Home {
            match link.target {
                LinkTarget::Section(section) => self.active_section == Some(section),
                LinkTarget::Page(_) => false,
            }
        } else {
            link.page() == Some(self.route)
        }
    }

    pub fn active_link(&self) -> Option<&'static NavLink> {
        nav_links().find(|link| self.is_link_active(link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes(about: (f64, f64), gallery: (f64, f64), contact: (f64, f64)) -> Vec<SectionBox> {
        vec![
            SectionBox {
                section: Section::About,
                top: about.0,
                bottom: about.1,
            },
            SectionBox {
                section: Section::Gallery,
                top: gallery.0,
                bottom: gallery.1,
            },
            SectionBox {
                section: Section::Contact,
                top: contact.0,
                bottom: contact.1,
            },
        ]
    }

    fn sample(offset: f64, sections: Vec<SectionBox>) -> ScrollSample {
        ScrollSample {
            offset,
            document_height: 5000.0,
            viewport_height: 1000.0,
            sections,
        }
    }

    // =========================================================================
    // Routes
    // =========================================================================

    #[test]
    fn route_paths_and_files() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Menu.output_file(), "menu/index.html");
        assert_eq!(Route::Contact.path(), "/contact");
    }

    #[test]
    fn route_from_path_normalizes() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/index.html"), Some(Route::Home));
        assert_eq!(Route::from_path("/menu/"), Some(Route::Menu));
        assert_eq!(Route::from_path("/menu#cold"), Some(Route::Menu));
        assert_eq!(Route::from_path("/contact/index.html"), Some(Route::Contact));
        assert_eq!(Route::from_path("/contact?ref=fb"), Some(Route::Contact));
        assert_eq!(Route::from_path("/blog"), None);
    }

    #[test]
    fn route_paths_roundtrip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    // =========================================================================
    // Links
    // =========================================================================

    #[test]
    fn nav_links_in_display_order() {
        let links: Vec<(&str, String)> = nav_links().map(|l| (l.label, l.href())).collect();
        assert_eq!(
            links,
            vec![
                ("Origins", "/#about".to_string()),
                ("Menu", "/menu".to_string()),
                ("Visuals", "/#gallery".to_string()),
                ("Contact", "/#contact".to_string()),
            ]
        );
    }

    #[test]
    fn section_ids_roundtrip() {
        for section in Section::ALL {
            assert_eq!(Section::from_id(section.id()), Some(section));
        }
        assert_eq!(Section::from_id("hero"), None);
    }

    // =========================================================================
    // Progress
    // =========================================================================

    #[test]
    fn progress_is_ratio_of_scrollable_height() {
        assert_eq!(scroll_progress(0.0, 5000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(2000.0, 5000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(4000.0, 5000.0, 1000.0), 1.0);
    }

    #[test]
    fn progress_clamped() {
        // Rubber-band overscroll reports offsets outside the range
        assert_eq!(scroll_progress(-30.0, 5000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(4100.0, 5000.0, 1000.0), 1.0);
    }

    #[test]
    fn progress_zero_for_nan_heights() {
        assert_eq!(scroll_progress(10.0, f64::NAN, 1000.0), 0.0);
        assert_eq!(scroll_progress(10.0, 5000.0, f64::NAN), 0.0);
        assert_eq!(scroll_progress(f64::NAN, 5000.0, 1000.0), 0.0);
    }

    #[test]
    fn progress_zero_when_page_does_not_scroll() {
        assert_eq!(scroll_progress(0.0, 800.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(10.0, 1000.0, 1000.0), 0.0);
    }

    // =========================================================================
    // Active section
    // =========================================================================

    #[test]
    fn active_section_straddles_anchor() {
        let sections = boxes((-400.0, 120.0), (120.0, 900.0), (900.0, 1600.0));
        assert_eq!(find_active_section(&sections, 150.0), Some(Section::Gallery));
    }

    #[test]
    fn active_section_inclusive_edges() {
        let sections = boxes((150.0, 800.0), (800.0, 1200.0), (1200.0, 1800.0));
        assert_eq!(find_active_section(&sections, 150.0), Some(Section::About));
    }

    #[test]
    fn active_section_first_in_order_wins() {
        // Overlapping boxes: about is listed first
        let sections = boxes((0.0, 200.0), (100.0, 900.0), (900.0, 1600.0));
        assert_eq!(find_active_section(&sections, 150.0), Some(Section::About));
    }

    #[test]
    fn active_section_none_over_hero() {
        let sections = boxes((700.0, 1400.0), (1400.0, 2100.0), (2100.0, 2800.0));
        assert_eq!(find_active_section(&sections, 150.0), None);
    }

    #[test]
    fn active_section_ignores_missing_sections() {
        let sections = vec![SectionBox {
            section: Section::Contact,
            top: 0.0,
            bottom: 500.0,
        }];
        assert_eq!(find_active_section(&sections, 150.0), Some(Section::Contact));
    }

    // =========================================================================
    // NavState
    // =========================================================================

    #[test]
    fn scrolled_past_threshold() {
        let mut nav = NavState::new(Route::Home, NavSettings::default());
        nav.observe(&sample(50.0, vec![]));
        assert!(!nav.scrolled);
        assert!(!nav.is_solid());

        nav.observe(&sample(51.0, vec![]));
        assert!(nav.scrolled);
        assert!(nav.is_solid());
    }

    #[test]
    fn zero_threshold_turns_solid_on_first_pixel() {
        let settings = NavSettings {
            scroll_threshold: 0.0,
            ..NavSettings::default()
        };
        let mut nav = NavState::new(Route::Home, settings);
        nav.observe(&sample(0.0, vec![]));
        assert!(!nav.is_solid());

        nav.observe(&sample(10.0, vec![]));
        assert!(nav.is_solid());
    }

    #[test]
    fn always_solid_off_home() {
        let nav = NavState::new(Route::Menu, NavSettings::default());
        assert!(!nav.scrolled);
        assert!(nav.is_solid());
    }

    #[test]
    fn observe_tracks_section_on_home() {
        let mut nav = NavState::new(Route::Home, NavSettings::default());
        nav.observe(&sample(
            1200.0,
            boxes((-500.0, 100.0), (100.0, 800.0), (800.0, 1500.0)),
        ));
        assert_eq!(nav.active_section, Some(Section::Gallery));
        assert_eq!(nav.progress, 0.3);
    }

    #[test]
    fn observe_keeps_previous_section_when_none_straddles() {
        let mut nav = NavState::new(Route::Home, NavSettings::default());
        nav.observe(&sample(
            900.0,
            boxes((0.0, 600.0), (600.0, 1300.0), (1300.0, 2000.0)),
        ));
        assert_eq!(nav.active_section, Some(Section::About));

        // Gap between sections
        nav.observe(&sample(
            1000.0,
            boxes((-700.0, 100.0), (200.0, 900.0), (900.0, 1600.0)),
        ));
        assert_eq!(nav.active_section, Some(Section::About));
    }

    #[test]
    fn observe_ignores_sections_off_home() {
        let mut nav = NavState::new(Route::Contact, NavSettings::default());
        nav.observe(&sample(300.0, boxes((0.0, 600.0), (600.0, 900.0), (900.0, 1200.0))));
        assert_eq!(nav.active_section, None);
    }

    #[test]
    fn custom_anchor_from_config() {
        let settings = NavSettings::from_config(&NavigationConfig {
            scroll_threshold: 10,
            anchor_offset: 400,
            ..NavigationConfig::default()
        });
        let mut nav = NavState::new(Route::Home, settings);
        nav.observe(&sample(
            20.0,
            boxes((0.0, 300.0), (300.0, 900.0), (900.0, 1500.0)),
        ));
        assert!(nav.scrolled);
        assert_eq!(nav.active_section, Some(Section::Gallery));
    }

    // =========================================================================
    // Highlighting
    // =========================================================================

    #[test]
    fn nothing_highlighted_on_fresh_home() {
        let nav = NavState::new(Route::Home, NavSettings::default());
        assert_eq!(nav.active_link(), None);
    }

    #[test]
    fn home_highlights_active_section_link_only() {
        let mut nav = NavState::new(Route::Home, NavSettings::default());
        nav.active_section = Some(Section::Contact);
        let active: Vec<&str> = nav_links()
            .filter(|l| nav.is_link_active(l))
            .map(|l| l.label)
            .collect();
        assert_eq!(active, vec!["Contact"]);
    }

    #[test]
    fn menu_route_highlights_menu_link() {
        let nav = NavState::new(Route::Menu, NavSettings::default());
        assert_eq!(nav.active_link().map(|l| l.label), Some("Menu"));
    }

    #[test]
    fn contact_route_highlights_contact_link() {
        let nav = NavState::new(Route::Contact, NavSettings::default());
        assert_eq!(nav.active_link().map(|l| l.label), Some("Contact"));
    }

    #[test]
    fn at_most_one_link_active_everywhere() {
        for route in Route::ALL {
            for section in [None, Some(Section::About), Some(Section::Gallery), Some(Section::Contact)] {
                let mut nav = NavState::new(route, NavSettings::default());
                nav.active_section = section;
                let count = nav_links().filter(|l| nav.is_link_active(l)).count();
                assert!(count <= 1, "{route:?} {section:?} highlighted {count}");
            }
        }
    }

    // =========================================================================
    // Mobile menu
    // =========================================================================

    #[test]
    fn toggle_and_follow_close_menu() {
        let mut nav = NavState::new(Route::Home, NavSettings::default());
        nav.toggle_menu();
        assert!(nav.menu_open);

        let href = nav.follow(&RIGHT_LINKS[0]);
        assert_eq!(href, "/#gallery");
        assert!(!nav.menu_open);

        nav.toggle_menu();
        nav.toggle_menu();
        assert!(!nav.menu_open);
    }
}
