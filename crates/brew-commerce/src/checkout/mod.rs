//! Checkout module.
//!
//! Contains customer details, validation, the order transaction, order
//! history, and the checkout state machine.

mod customer;
mod flow;
mod order;
mod service;

pub use customer::{CheckoutFields, Customer, DeliveryOption};
pub use flow::{CheckoutFlow, CheckoutState};
pub use order::{Order, OrderHistory};
pub use service::{OrderService, ValidatedCheckout};
