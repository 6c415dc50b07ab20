//! Checkout validation and the order transaction.

use crate::cart::{CartStore, LineItem, PricingEngine};
use crate::checkout::{CheckoutFields, Customer, DeliveryOption, Order, OrderHistory};
use crate::error::{CommerceError, ValidationError};
use crate::ids::OrderId;
use brew_store::Store;
use chrono::Utc;

/// Proof that a set of checkout fields passed validation.
///
/// Only [`OrderService::validate`] creates one, so an order cannot be
/// placed from fields nobody checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheckout {
    fields: CheckoutFields,
    customer: Customer,
}

impl ValidatedCheckout {
    /// Customer details that will go on the order.
    pub fn customer(&self) -> &Customer {
        &self.customer
    }
}

/// Turns a cart plus customer details into a recorded order.
#[derive(Debug, Clone)]
pub struct OrderService {
    history: OrderHistory,
}

impl OrderService {
    pub fn new(store: Store) -> Self {
        Self {
            history: OrderHistory::new(store),
        }
    }

    /// Orders placed so far.
    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    /// Check checkout input against the cart.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// name, phone, delivery option, address (delivery only), then a
    /// non-empty cart. Text fields are trimmed first. No side effects.
    pub fn validate(
        fields: &CheckoutFields,
        cart: &[LineItem],
    ) -> Result<ValidatedCheckout, ValidationError> {
        let fields = fields.trimmed();

        if fields.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if fields.phone.is_empty() {
            return Err(ValidationError::MissingPhone);
        }
        let delivery_option = fields
            .delivery_option
            .ok_or(ValidationError::MissingDeliveryOption)?;
        if delivery_option.needs_address() && fields.address.is_empty() {
            return Err(ValidationError::MissingAddress);
        }
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        let address = match delivery_option {
            DeliveryOption::Delivery => fields.address.clone(),
            DeliveryOption::Pickup => String::new(),
        };
        let customer = Customer {
            name: fields.name.clone(),
            phone: fields.phone.clone(),
            address,
            delivery_option,
            notes: fields.notes.clone(),
        };
        Ok(ValidatedCheckout { fields, customer })
    }

    /// Record an order for the current cart, then empty the cart.
    ///
    /// Either both happen or neither does: the cart is only cleared once
    /// the order is persisted, and if clearing fails the order is taken
    /// back out of the history. The cart is re-checked at placement time;
    /// a checkout that no longer validates (say the cart was emptied since)
    /// is a caller bug. Debug builds panic on it; release builds fail with
    /// [`CommerceError::PreconditionViolated`] without writing anything.
    pub fn place_order(
        &self,
        checkout: ValidatedCheckout,
        cart: &mut CartStore,
    ) -> Result<Order, CommerceError> {
        let items = cart.snapshot();
        let checkout = match Self::validate(&checkout.fields, &items) {
            Ok(checkout) => checkout,
            Err(reason) => {
                tracing::error!(%reason, "place_order called with a checkout that does not validate");
                if cfg!(debug_assertions) {
                    panic!("place_order precondition violated: {reason}");
                }
                return Err(CommerceError::PreconditionViolated(reason.to_string()));
            }
        };

        let pricing = PricingEngine::price(&items)?;
        let created_at = Utc::now();
        let order = Order {
            id: OrderId::generate(created_at),
            customer: checkout.customer,
            items,
            subtotal: pricing.subtotal,
            tax: pricing.tax,
            total: pricing.grand_total,
            created_at,
        };

        let previous = self.history.append(order.clone())?;

        if let Err(e) = cart.clear() {
            tracing::warn!(order_id = %order.id, error = %e, "cart clear failed, withdrawing order");
            if let Err(rollback) = self.history.restore(&previous) {
                tracing::error!(
                    order_id = %order.id,
                    error = %rollback,
                    "could not withdraw order after failed cart clear"
                );
            }
            return Err(e);
        }

        tracing::info!(
            order_id = %order.id,
            items = order.item_count(),
            total = order.total.rupees(),
            delivery = %order.customer.delivery_option,
            "order placed"
        );
        Ok(order)
    }

    /// Validate and place in one step.
    pub fn checkout(
        &self,
        fields: &CheckoutFields,
        cart: &mut CartStore,
    ) -> Result<Order, CommerceError> {
        let checkout = Self::validate(fields, cart.cart().items())?;
        self.place_order(checkout, cart)
    }
}
