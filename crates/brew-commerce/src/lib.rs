//! Cart and order state management for the BrewAura cafe storefront.
//!
//! This crate holds everything with state and invariants behind the
//! storefront pages:
//!
//! - **Catalog**: the static menu, price lookup, category filter
//! - **Cart**: line items, the persisted cart owner, pricing with 5% tax
//! - **Checkout**: validation, the order transaction, order history
//!
//! Rendering is someone else's job. A front end holds one [`CartStore`]
//! and one [`OrderService`] over a shared [`brew_store::Store`], calls
//! into them on user actions, and shows what they return.
//!
//! # Example
//!
//! ```rust
//! use brew_commerce::prelude::*;
//! use brew_store::Store;
//!
//! let store = Store::in_memory();
//! let catalog = PriceCatalog::standard();
//! let mut cart = CartStore::load(store.clone());
//!
//! cart.add_catalog_item(&catalog, "espresso").unwrap();
//! cart.add_catalog_item(&catalog, "espresso").unwrap();
//! cart.add_catalog_item(&catalog, "cappuccino").unwrap();
//!
//! let pricing = cart.pricing().unwrap();
//! assert_eq!(pricing.grand_total.display(), "₹630");
//!
//! let fields = CheckoutFields {
//!     name: "Asha".into(),
//!     phone: "98450 12345".into(),
//!     delivery_option: Some(DeliveryOption::Pickup),
//!     ..Default::default()
//! };
//! let service = OrderService::new(store);
//! let order = service.checkout(&fields, &mut cart).unwrap();
//! assert!(cart.is_empty());
//! assert_eq!(order.total, Money::new(630));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

#[cfg(test)]
mod test_support;

pub use cart::{CartStore, PricingEngine};
pub use checkout::{Order, OrderService};
pub use error::{CommerceError, ValidationError};
pub use ids::*;
pub use money::{format_currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::{format_currency, Money};

    // Catalog
    pub use crate::catalog::{Category, MenuFilter, MenuItem, PriceCatalog};

    // Cart
    pub use crate::cart::{
        Cart, CartPricing, CartStore, LineItem, LineItemPricing, PricingEngine,
        MAX_QUANTITY_PER_ITEM, TAX_RATE_PERCENT,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutFields, CheckoutFlow, CheckoutState, Customer, DeliveryOption, Order,
        OrderHistory, OrderService, ValidatedCheckout,
    };
}
