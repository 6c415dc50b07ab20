//! Static price catalog.

use crate::catalog::{Category, MenuFilter, MenuItem};
use crate::error::CommerceError;
use crate::money::{Money, RUPEE_SYMBOL};

const STANDARD_MENU: &[(&str, &str, i64, Category)] = &[
    ("espresso", "Espresso", 180, Category::Coffee),
    ("cappuccino", "Cappuccino", 240, Category::Coffee),
    ("latte", "Latte", 260, Category::Coffee),
    ("americano", "Americano", 200, Category::Coffee),
    ("mocha", "Mocha", 290, Category::Coffee),
    ("macchiato", "Macchiato", 220, Category::Coffee),
    ("cold-brew", "Cold Brew", 250, Category::Coffee),
    ("flat-white", "Flat White", 260, Category::Coffee),
    ("croissant", "Croissant", 190, Category::Pastries),
    ("muffin", "Muffin", 180, Category::Pastries),
    ("donut", "Donut", 150, Category::Pastries),
    ("sandwich", "Sandwich", 350, Category::Pastries),
    ("cookie", "Cookie", 140, Category::Pastries),
    ("brownie", "Brownie", 210, Category::Pastries),
];

/// Menu items keyed by id, with their unit prices.
///
/// Insertion order is menu order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCatalog {
    items: Vec<MenuItem>,
}

impl PriceCatalog {
    /// The cafe's standard menu.
    pub fn standard() -> Self {
        let items = STANDARD_MENU
            .iter()
            .map(|&(id, name, price, category)| {
                MenuItem::new(
                    id,
                    name,
                    Money::new(price),
                    format!("images/{id}.jpg"),
                    category,
                )
            })
            .collect();
        Self { items }
    }

    /// Build a catalog from arbitrary items. Later duplicates are ignored.
    pub fn with_items(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut catalog = Self { items: Vec::new() };
        for item in items {
            if catalog.get(item.id.as_str()).is_none() {
                catalog.items.push(item);
            }
        }
        catalog
    }

    /// All items in menu order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Look up an item.
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    /// Items passing a menu filter, in menu order.
    pub fn filter_menu(&self, filter: MenuFilter) -> Vec<&MenuItem> {
        self.items.iter().filter(|i| filter.matches(i)).collect()
    }

    /// Unit price for `id`; unknown ids cost nothing.
    ///
    /// An unknown id is logged and priced at zero. Use
    /// [`PriceCatalog::try_price_of`] where an unknown id should be refused.
    pub fn price_of(&self, id: &str) -> Money {
        match self.get(id) {
            Some(item) => item.price,
            None => {
                tracing::warn!(item_id = id, "item missing from price catalog, using zero price");
                Money::zero()
            }
        }
    }

    /// Unit price for `id`, failing on unknown ids.
    pub fn try_price_of(&self, id: &str) -> Result<Money, CommerceError> {
        self.get(id)
            .map(|i| i.price)
            .ok_or_else(|| CommerceError::UnknownItem(id.to_string()))
    }

    /// Price shown in rendered markup if it parses, else the catalog price.
    pub fn resolve_price(&self, id: &str, rendered: Option<&str>) -> Money {
        rendered
            .and_then(parse_display_price)
            .unwrap_or_else(|| self.price_of(id))
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Read a rupee amount out of display text such as `"₹1,250"`.
///
/// Grouping commas after the symbol are accepted. Returns `None` when the
/// text holds no symbol followed by digits.
pub fn parse_display_price(text: &str) -> Option<Money> {
    let start = text.find(RUPEE_SYMBOL)? + RUPEE_SYMBOL.len();
    let digits: String = text[start..]
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok().map(Money::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_prices() {
        let catalog = PriceCatalog::standard();
        assert_eq!(catalog.items().len(), 14);
        assert_eq!(catalog.price_of("espresso"), Money::new(180));
        assert_eq!(catalog.price_of("cappuccino"), Money::new(240));
        assert_eq!(catalog.price_of("sandwich"), Money::new(350));
    }

    #[test]
    fn test_unknown_item_is_free_when_lenient() {
        let catalog = PriceCatalog::standard();
        assert_eq!(catalog.price_of("chai"), Money::zero());
    }

    #[test]
    fn test_unknown_item_rejected_when_strict() {
        let catalog = PriceCatalog::standard();
        assert!(matches!(
            catalog.try_price_of("chai"),
            Err(CommerceError::UnknownItem(id)) if id == "chai"
        ));
        assert_eq!(catalog.try_price_of("latte").unwrap(), Money::new(260));
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = PriceCatalog::standard();
        let pastries = catalog.filter_menu(MenuFilter::Only(Category::Pastries));
        assert_eq!(pastries.len(), 6);
        assert!(pastries.iter().all(|i| i.category == Category::Pastries));
        assert_eq!(catalog.filter_menu(MenuFilter::All).len(), 14);
    }

    #[test]
    fn test_parse_display_price() {
        assert_eq!(parse_display_price("\u{20b9}180"), Some(Money::new(180)));
        assert_eq!(
            parse_display_price("Only \u{20b9}1,250 today"),
            Some(Money::new(1250))
        );
        assert_eq!(parse_display_price("180"), None);
        assert_eq!(parse_display_price("\u{20b9}"), None);
    }

    #[test]
    fn test_resolve_price_prefers_rendered() {
        let catalog = PriceCatalog::standard();
        assert_eq!(
            catalog.resolve_price("latte", Some("\u{20b9}275")),
            Money::new(275)
        );
        assert_eq!(catalog.resolve_price("latte", Some("n/a")), Money::new(260));
        assert_eq!(catalog.resolve_price("latte", None), Money::new(260));
    }

    #[test]
    fn test_with_items_keeps_first_duplicate() {
        let catalog = PriceCatalog::with_items([
            MenuItem::new("a", "A", Money::new(1), "a.jpg", Category::Coffee),
            MenuItem::new("a", "A2", Money::new(2), "a.jpg", Category::Coffee),
        ]);
        assert_eq!(catalog.items().len(), 1);
        assert_eq!(catalog.price_of("a"), Money::new(1));
    }
}
