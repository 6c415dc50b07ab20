//! Order records and the order history.

use crate::cart::LineItem;
use crate::checkout::{Customer, DeliveryOption};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Money;
use brew_store::{keys, Store, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed order. Never modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Who ordered and how they receive it.
    pub customer: Customer,
    /// Cart contents at placement time.
    pub items: Vec<LineItem>,
    /// Sum of line totals.
    #[serde(default)]
    pub subtotal: Money,
    /// Tax on the subtotal.
    #[serde(default)]
    pub tax: Money,
    /// Amount charged: subtotal plus tax.
    pub total: Money,
    /// When the order was placed.
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Thank-you text shown once the order is placed.
    pub fn confirmation_message(&self) -> String {
        let c = &self.customer;
        let destination = match c.delivery_option {
            DeliveryOption::Delivery => format!(" to {}", c.address),
            DeliveryOption::Pickup => String::new(),
        };
        format!(
            "Thank you, {}! Your order has been placed successfully. \
             We'll contact you at {} when your order is ready for {}{}.",
            c.name, c.phone, c.delivery_option, destination
        )
    }
}

/// Append-only list of placed orders.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    store: Store,
}

impl OrderHistory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All orders, oldest first. Unreadable history reads as empty.
    pub fn all(&self) -> Vec<Order> {
        self.store.load_or_default(keys::ORDERS)
    }

    /// Number of recorded orders.
    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find an order by id.
    pub fn find(&self, id: &OrderId) -> Option<Order> {
        self.all().into_iter().find(|o| &o.id == id)
    }

    /// Append an order and persist. Returns the history as it was before.
    ///
    /// History that fails to parse counts as empty and is overwritten.
    /// Storage read failures are returned.
    pub fn append(&self, order: Order) -> Result<Vec<Order>, CommerceError> {
        let previous = match self.store.get::<Vec<Order>>(keys::ORDERS) {
            Ok(orders) => orders.unwrap_or_default(),
            Err(StoreError::SerializeError(e)) => {
                tracing::warn!(
                    key = keys::ORDERS,
                    error = %e,
                    order_id = %order.id,
                    "order history unreadable, overwriting it with the new order"
                );
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        let mut next = previous.clone();
        next.push(order);
        self.store.set(keys::ORDERS, &next)?;
        Ok(previous)
    }

    /// Put back a history captured by [`OrderHistory::append`].
    pub(crate) fn restore(&self, previous: &[Order]) -> Result<(), CommerceError> {
        self.store.set(keys::ORDERS, previous)?;
        Ok(())
    }
}
