//! Menu data and the category selector.
//!
//! The menu is a fixed table of categories, each with an ordered list of
//! items. It is compiled into the binary and never mutated.
//!
//! Two views read it:
//!
//! - the **full** menu page, driven by a [`MenuSelector`] with exactly one
//!   active category (the first, unless a `#fragment` deep link names another);
//! - the **compact** home-page teaser, which shows one [`CategorySummary`]
//!   card per category and links to `/menu`. It has no selection state.

use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MenuError {
    #[error("unknown menu category: {0}")]
    UnknownCategory(String),
    #[error("duplicate menu category id: {0}")]
    DuplicateCategory(String),
    #[error("duplicate item id {item} in category {category}")]
    DuplicateItem { category: String, item: String },
    #[error("menu has no categories")]
    Empty,
}

/// Icon shown next to a category. Resolved to inline SVG at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    MugHot,
    GlassWater,
    Utensils,
    CakeCandles,
}

/// A palette tone, emitted as the matching `--color-*` custom property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Accent,
    Ink,
}

impl Tone {
    pub fn css_var(self) -> &'static str {
        match self {
            Tone::Primary => "var(--color-primary)",
            Tone::Secondary => "var(--color-secondary)",
            Tone::Accent => "var(--color-accent)",
            Tone::Ink => "var(--color-ink)",
        }
    }
}

/// Two-stop gradient behind a category icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gradient {
    SecondaryToPrimary,
    AccentToSecondary,
    PrimaryToInk,
    SecondaryToAccent,
}

impl Gradient {
    pub fn stops(self) -> (Tone, Tone) {
        match self {
            Gradient::SecondaryToPrimary => (Tone::Secondary, Tone::Primary),
            Gradient::AccentToSecondary => (Tone::Accent, Tone::Secondary),
            Gradient::PrimaryToInk => (Tone::Primary, Tone::Ink),
            Gradient::SecondaryToAccent => (Tone::Secondary, Tone::Accent),
        }
    }

    pub fn css(self) -> String {
        let (from, to) = self.stops();
        format!(
            "linear-gradient(135deg, {}, {})",
            from.css_var(),
            to.css_var()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Display string, currency included.
    pub price: &'static str,
    pub ingredients: Option<&'static str>,
    pub popular: bool,
}

impl MenuItem {
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        price: &'static str,
        ingredients: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            ingredients: Some(ingredients),
            popular: false,
        }
    }

    const fn popular(self) -> Self {
        Self {
            popular: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: CategoryIcon,
    pub gradient: Gradient,
    pub items: &'static [MenuItem],
}

static MENU: &[MenuCategory] = &[
    MenuCategory {
        id: "coffee",
        title: "Coffee & Hot Beverages",
        description: "Artisanal espresso drinks, lattes, and specialty coffees crafted with passion",
        icon: CategoryIcon::MugHot,
        gradient: Gradient::SecondaryToPrimary,
        items: &[
            MenuItem::new(
                "espresso",
                "Classic Espresso",
                "Rich, bold single shot of our signature house blend",
                "$3.50",
                "100% Arabica beans, freshly ground",
            ),
            MenuItem::new(
                "americano",
                "Americano",
                "Double shot espresso with hot water",
                "$4.00",
                "Espresso, hot water",
            ),
            MenuItem::new(
                "cappuccino",
                "Cappuccino",
                "Perfect balance of espresso, steamed milk, and foam",
                "$5.00",
                "Espresso, steamed milk, milk foam",
            )
            .popular(),
            MenuItem::new(
                "latte",
                "Café Latte",
                "Creamy espresso with steamed milk and light foam",
                "$5.50",
                "Espresso, steamed milk",
            )
            .popular(),
            MenuItem::new(
                "mocha",
                "Café Mocha",
                "Rich chocolate meets espresso in perfect harmony",
                "$6.00",
                "Espresso, chocolate syrup, steamed milk, whipped cream",
            ),
            MenuItem::new(
                "flatwhite",
                "Flat White",
                "Australian-style with velvety microfoam",
                "$5.50",
                "Double espresso, microfoam",
            ),
            MenuItem::new(
                "macchiato",
                "Caramel Macchiato",
                "Vanilla-infused milk marked with espresso and caramel",
                "$6.00",
                "Vanilla syrup, steamed milk, espresso, caramel drizzle",
            ),
            MenuItem::new(
                "hotchocolate",
                "Signature Hot Chocolate",
                "Belgian chocolate topped with marshmallows",
                "$5.50",
                "Belgian chocolate, steamed milk, marshmallows",
            ),
        ],
    },
    MenuCategory {
        id: "cold",
        title: "Cold Beverages",
        description: "Refreshing freddos, smoothies, milkshakes, and iced specialty drinks",
        icon: CategoryIcon::GlassWater,
        gradient: Gradient::AccentToSecondary,
        items: &[
            MenuItem::new(
                "icedcoffee",
                "Iced Coffee",
                "Chilled coffee served over ice with your choice of milk",
                "$5.00",
                "Cold brew, ice, milk of choice",
            ),
            MenuItem::new(
                "freddo",
                "Greek Freddo Espresso",
                "Shaken iced espresso with signature crema",
                "$5.50",
                "Double espresso, ice, shaken",
            )
            .popular(),
            MenuItem::new(
                "freddocapp",
                "Freddo Cappuccino",
                "Iced espresso topped with cold milk foam",
                "$6.00",
                "Double espresso, cold milk foam, ice",
            )
            .popular(),
            MenuItem::new(
                "frappe",
                "Classic Frappé",
                "Greek-style whipped iced coffee",
                "$5.50",
                "Instant coffee, ice, milk, whipped",
            ),
            MenuItem::new(
                "smoothie-mango",
                "Tropical Mango Smoothie",
                "Fresh mango blended with yogurt and honey",
                "$6.50",
                "Fresh mango, Greek yogurt, honey, ice",
            ),
            MenuItem::new(
                "smoothie-berry",
                "Mixed Berry Smoothie",
                "Antioxidant-rich blend of seasonal berries",
                "$6.50",
                "Strawberries, blueberries, raspberries, yogurt",
            ),
            MenuItem::new(
                "milkshake-choc",
                "Chocolate Milkshake",
                "Thick and creamy Belgian chocolate shake",
                "$6.00",
                "Belgian chocolate, ice cream, milk",
            ),
            MenuItem::new(
                "milkshake-vanilla",
                "Vanilla Bean Milkshake",
                "Classic vanilla with real vanilla bean",
                "$6.00",
                "Real vanilla bean, ice cream, milk",
            ),
        ],
    },
    MenuCategory {
        id: "food",
        title: "Food & Mains",
        description: "Delicious wraps, burgers, pasta, pizza, and gourmet platters",
        icon: CategoryIcon::Utensils,
        gradient: Gradient::PrimaryToInk,
        items: &[
            MenuItem::new(
                "club",
                "Classic Club Sandwich",
                "Triple-decker with turkey, bacon, lettuce, tomato",
                "$12.00",
                "Turkey breast, bacon, lettuce, tomato, mayo, toasted bread",
            )
            .popular(),
            MenuItem::new(
                "wrap-chicken",
                "Grilled Chicken Wrap",
                "Marinated chicken with fresh vegetables and tzatziki",
                "$11.00",
                "Grilled chicken, lettuce, tomato, onion, tzatziki, tortilla",
            ),
            MenuItem::new(
                "burger-beef",
                "Signature Beef Burger",
                "Juicy beef patty with caramelized onions and special sauce",
                "$14.00",
                "Beef patty, cheddar, caramelized onions, lettuce, tomato, brioche bun",
            )
            .popular(),
            MenuItem::new(
                "pasta-alfredo",
                "Fettuccine Alfredo",
                "Creamy parmesan sauce with grilled chicken",
                "$15.00",
                "Fresh pasta, parmesan cream sauce, grilled chicken, herbs",
            ),
            MenuItem::new(
                "pasta-bolognese",
                "Spaghetti Bolognese",
                "Traditional Italian meat sauce with fresh basil",
                "$14.00",
                "Spaghetti, slow-cooked meat sauce, parmesan, fresh basil",
            ),
            MenuItem::new(
                "pizza-margherita",
                "Margherita Pizza",
                "Classic tomato, mozzarella, and fresh basil",
                "$13.00",
                "San Marzano tomatoes, fresh mozzarella, basil, olive oil",
            ),
            MenuItem::new(
                "pizza-pepperoni",
                "Pepperoni Pizza",
                "Generous pepperoni with mozzarella and herbs",
                "$15.00",
                "Pepperoni, mozzarella, tomato sauce, oregano",
            ),
            MenuItem::new(
                "salad-caesar",
                "Caesar Salad",
                "Crisp romaine with parmesan and house-made croutons",
                "$10.00",
                "Romaine lettuce, parmesan, croutons, Caesar dressing",
            ),
        ],
    },
    MenuCategory {
        id: "desserts",
        title: "Sweet Endings",
        description: "Indulgent brownies, cakes, and signature desserts",
        icon: CategoryIcon::CakeCandles,
        gradient: Gradient::SecondaryToAccent,
        items: &[
            MenuItem::new(
                "brownie",
                "Chocolate Fudge Brownie",
                "Warm chocolate brownie with vanilla ice cream",
                "$7.50",
                "Dark chocolate, walnuts, vanilla ice cream",
            )
            .popular(),
            MenuItem::new(
                "cheesecake",
                "New York Cheesecake",
                "Creamy cheesecake with berry compote",
                "$8.00",
                "Cream cheese, graham crust, mixed berry compote",
            ),
            MenuItem::new(
                "tiramisu",
                "Classic Tiramisu",
                "Italian coffee-soaked ladyfingers with mascarpone",
                "$8.50",
                "Espresso, ladyfingers, mascarpone, cocoa powder",
            )
            .popular(),
            MenuItem::new(
                "carrot-cake",
                "Carrot Cake",
                "Spiced carrot cake with cream cheese frosting",
                "$7.50",
                "Carrots, walnuts, spices, cream cheese frosting",
            ),
            MenuItem::new(
                "waffle",
                "Belgian Waffle",
                "Crispy waffle with fresh berries and maple syrup",
                "$9.00",
                "Belgian waffle, fresh berries, maple syrup, whipped cream",
            ),
            MenuItem::new(
                "croissant",
                "Almond Croissant",
                "Buttery croissant filled with almond cream",
                "$5.50",
                "Butter pastry, almond cream, sliced almonds",
            ),
        ],
    },
];

/// The café's menu, in display order.
pub fn categories() -> &'static [MenuCategory] {
    MENU
}

/// Look up a category by id.
pub fn find_category(id: &str) -> Option<&'static MenuCategory> {
    MENU.iter().find(|c| c.id == id)
}

/// Check that category ids are unique and item ids are unique within each
/// category.
pub fn validate_menu(categories: &[MenuCategory]) -> Result<(), MenuError> {
    if categories.is_empty() {
        return Err(MenuError::Empty);
    }
    let mut category_ids = HashSet::new();
    for category in categories {
        if !category_ids.insert(category.id) {
            return Err(MenuError::DuplicateCategory(category.id.to_string()));
        }
        let mut item_ids = HashSet::new();
        for item in category.items {
            if !item_ids.insert(item.id) {
                return Err(MenuError::DuplicateItem {
                    category: category.id.to_string(),
                    item: item.id.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// One active category out of a fixed list.
#[derive(Debug, Clone)]
pub struct MenuSelector<'a> {
    categories: &'a [MenuCategory],
    active: usize,
}

impl<'a> MenuSelector<'a> {
    /// Start on the first category.
    pub fn new(categories: &'a [MenuCategory]) -> Result<Self, MenuError> {
        if categories.is_empty() {
            return Err(MenuError::Empty);
        }
        Ok(Self {
            categories,
            active: 0,
        })
    }

    /// Start on the category named by a URL fragment (`#cold` or `cold`),
    /// falling back to the first category when it names nothing.
    pub fn from_fragment(categories: &'a [MenuCategory], fragment: &str) -> Result<Self, MenuError> {
        let mut selector = Self::new(categories)?;
        let id = fragment.trim_start_matches('#');
        if !id.is_empty() && selector.select(id).is_err() {
            tracing::debug!(fragment = id, "fragment names no category");
        }
        Ok(selector)
    }

    /// Switch to the category with `id`. Unknown ids leave the selection as is.
    pub fn select(&mut self, id: &str) -> Result<&'a MenuCategory, MenuError> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| MenuError::UnknownCategory(id.to_string()))?;
        self.active = index;
        Ok(&self.categories[index])
    }

    pub fn active(&self) -> &'a MenuCategory {
        &self.categories[self.active]
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active().id == id
    }

    /// Items of the active category, in menu order.
    pub fn items(&self) -> &'a [MenuItem] {
        self.active().items
    }

    pub fn categories(&self) -> &'a [MenuCategory] {
        self.categories
    }
}

/// What a compact menu card shows for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: CategoryIcon,
    pub gradient: Gradient,
    pub item_count: usize,
}

pub fn summaries(categories: &[MenuCategory]) -> Vec<CategorySummary> {
    categories
        .iter()
        .map(|c| CategorySummary {
            id: c.id,
            title: c.title,
            description: c.description,
            icon: c.icon,
            gradient: c.gradient,
            item_count: c.items.len(),
        })
        .collect()
}
