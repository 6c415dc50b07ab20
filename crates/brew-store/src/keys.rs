//! Logical storage keys shared by the storefront components.
//!
//! The names match the keys the browser storefront writes, so a data
//! directory exported from local storage loads unchanged.

/// Cart line items, in first-added order.
pub const CART: &str = "brewAuraCart";

/// Registered users.
pub const USERS: &str = "brewAuraUsers";

/// The currently logged-in user, if any.
pub const SESSION: &str = "brewAuraUser";

/// Append-only order history.
pub const ORDERS: &str = "brewAuraOrders";
