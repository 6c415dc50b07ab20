//! Menu catalog module.
//!
//! Contains the static menu, the price lookup used when a caller has no
//! price of its own, and the category filter behind the menu page.

mod menu;
mod price;

pub use menu::{Category, MenuFilter, MenuItem};
pub use price::{parse_display_price, PriceCatalog};
