//! Menu items and category filtering.

use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Hot and cold coffee drinks.
    Coffee,
    /// Baked goods and snacks.
    Pastries,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Coffee => "coffee",
            Category::Pastries => "pastries",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Coffee => "Coffee",
            Category::Pastries => "Pastries",
        }
    }

    /// All categories in menu order.
    pub fn all() -> [Category; 2] {
        [Category::Coffee, Category::Pastries]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coffee" => Ok(Category::Coffee),
            "pastries" => Ok(Category::Pastries),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// One entry on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    /// Image reference, relative to the site root.
    pub image: String,
    pub category: Category,
}

impl MenuItem {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            category,
        }
    }
}

/// Which menu items to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuFilter {
    #[default]
    All,
    Only(Category),
}

impl MenuFilter {
    /// Check whether an item passes the filter.
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            MenuFilter::All => true,
            MenuFilter::Only(category) => item.category == *category,
        }
    }
}

impl FromStr for MenuFilter {
    type Err = String;

    /// Parse a filter button value: `"all"` or a category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(MenuFilter::All);
        }
        s.parse().map(MenuFilter::Only)
    }
}

impl fmt::Display for MenuFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuFilter::All => f.write_str("all"),
            MenuFilter::Only(category) => write!(f, "{category}"),
        }
    }
}
