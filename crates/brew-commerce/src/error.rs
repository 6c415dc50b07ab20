//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and order operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Item id not present in the price catalog.
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// User-correctable checkout problem.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An order was placed without a checkout that still validates.
    ///
    /// This is a caller defect, not something to show a customer.
    #[error("Order placed without a valid checkout: {0}")]
    PreconditionViolated(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Persistence failure.
    #[error("Storage error: {0}")]
    Storage(#[from] brew_store::StoreError),
}

/// Reasons a checkout is rejected, in the order they are checked.
///
/// The `Display` text is shown to the customer verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    MissingName,

    #[error("Please enter your phone number.")]
    MissingPhone,

    #[error("Please select a delivery option.")]
    MissingDeliveryOption,

    #[error("Please enter your delivery address.")]
    MissingAddress,

    #[error("Your cart is empty. Please add items before placing an order.")]
    EmptyCart,
}

impl CommerceError {
    /// Message suitable for the notification layer, if this error is one
    /// the customer can act on.
    pub fn user_message(&self) -> Option<String> {
        match self {
            CommerceError::Validation(v) => Some(v.to_string()),
            CommerceError::QuantityExceedsLimit(_, max) => {
                Some(format!("You can order at most {max} of one item."))
            }
            _ => None,
        }
    }
}
