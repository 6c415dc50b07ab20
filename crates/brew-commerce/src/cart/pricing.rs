//! Cart pricing calculations.
//!
//! Pure functions over a cart snapshot; nothing here holds state.

use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat consumption tax applied to every order.
pub const TAX_RATE_PERCENT: i64 = 5;

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal plus tax.
    pub grand_total: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItemPricing {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price * quantity.
    pub total: Money,
}

/// Subtotal, tax and grand total computation.
pub struct PricingEngine;

impl PricingEngine {
    /// Sum over line items of unit price times quantity.
    pub fn subtotal(items: &[LineItem]) -> Result<Money, CommerceError> {
        let mut subtotal = Money::zero();
        for item in items {
            subtotal = subtotal
                .try_add(item.total_price()?)
                .ok_or(CommerceError::Overflow)?;
        }
        Ok(subtotal)
    }

    /// Tax on a subtotal, rounded half up to the nearest rupee.
    pub fn tax(subtotal: Money) -> Money {
        let scaled = i128::from(subtotal.rupees()) * i128::from(TAX_RATE_PERCENT) + 50;
        let rupees = scaled.div_euclid(100);
        // |subtotal| * 5 / 100 always fits back into i64
        Money::new(rupees as i64)
    }

    /// Subtotal plus tax.
    pub fn grand_total(subtotal: Money, tax: Money) -> Result<Money, CommerceError> {
        subtotal.try_add(tax).ok_or(CommerceError::Overflow)
    }

    /// Full breakdown for rendering or order creation.
    pub fn price(items: &[LineItem]) -> Result<CartPricing, CommerceError> {
        let line_items = items
            .iter()
            .map(|item| {
                Ok(LineItemPricing {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    total: item.total_price()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal = Money::try_sum(line_items.iter().map(|l| l.total))
            .ok_or(CommerceError::Overflow)?;
        let tax = Self::tax(subtotal);
        let grand_total = Self::grand_total(subtotal, tax)?;

        Ok(CartPricing {
            subtotal,
            tax,
            grand_total,
            item_count: items.iter().map(|i| i.quantity).sum(),
            line_items,
        })
    }
}
