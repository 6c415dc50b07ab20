//! Cart and line item types.

use crate::catalog::MenuItem;
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A line item in the cart.
///
/// Serialized with the field names the storefront has always used, so
/// `unit_price` is stored as `price`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Menu item identifier. Unique within a cart.
    pub id: ItemId,
    /// Item name (denormalized for display).
    pub name: String,
    /// Unit price.
    #[serde(rename = "price")]
    pub unit_price: Money,
    /// Image reference.
    pub image: String,
    /// Menu category.
    pub category: String,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// Create a line item with quantity 1.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image: image.into(),
            category: category.into(),
            quantity: 1,
        }
    }

    /// Total price (unit_price * quantity).
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

impl From<&MenuItem> for LineItem {
    fn from(item: &MenuItem) -> Self {
        LineItem::new(
            item.id.clone(),
            item.name.clone(),
            item.price,
            item.image.clone(),
            item.category.as_str(),
        )
    }
}

/// An ordered collection of line items, at most one per item id.
///
/// Order is first-added order. Persisted as a bare JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from persisted items, repairing anything that breaks
    /// the cart invariants.
    ///
    /// Items with a quantity below 1 are dropped; a repeated id keeps its
    /// first position and absorbs the later quantity, capped at
    /// [`MAX_QUANTITY_PER_ITEM`]. Returns the cart and whether any repair
    /// was needed.
    pub fn from_items(items: Vec<LineItem>) -> (Self, bool) {
        let mut cart = Cart::new();
        let mut repaired = false;
        for item in items {
            if item.quantity < 1 {
                repaired = true;
                continue;
            }
            if let Some(existing) = cart.items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
                repaired = true;
                continue;
            }
            if item.quantity > MAX_QUANTITY_PER_ITEM {
                repaired = true;
                cart.items.push(LineItem {
                    quantity: MAX_QUANTITY_PER_ITEM,
                    ..item
                });
                continue;
            }
            cart.items.push(item);
        }
        (cart, repaired)
    }

    /// Add one unit of an item.
    ///
    /// If the id is already present its quantity goes up by one and the
    /// stored name, price and image are left as they were. Otherwise the
    /// item is appended with quantity 1.
    pub fn add(&mut self, item: LineItem) -> Result<(), CommerceError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let new_quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            return Ok(());
        }

        self.items.push(LineItem { quantity: 1, ..item });
        Ok(())
    }

    /// Remove an item. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Overwrite an item's quantity.
    ///
    /// A quantity below 1 removes the item. Returns whether the cart
    /// changed; an absent id is not an error.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return Ok(self.remove(id));
        }

        let Some(item) = self.items.iter_mut().find(|i| &i.id == id) else {
            return Ok(false);
        };
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        if item.quantity == quantity {
            return Ok(false);
        }
        item.quantity = quantity;
        Ok(true)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in first-added order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
