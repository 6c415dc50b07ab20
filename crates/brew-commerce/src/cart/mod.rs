//! Shopping cart module.
//!
//! Contains the cart model, its persisted owner, and pricing.

#[allow(clippy::module_inception)]
mod cart;
mod pricing;
mod store;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing, PricingEngine, TAX_RATE_PERCENT};
pub use store::{CartListener, CartStore};
