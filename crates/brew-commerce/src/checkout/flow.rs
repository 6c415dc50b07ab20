//! Checkout flow state machine.

use crate::cart::CartStore;
use crate::checkout::{CheckoutFields, Order, OrderService};
use crate::error::{CommerceError, ValidationError};

/// Where a checkout stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Form open, nothing submitted (or editing after a rejection).
    Editing,
    /// Submit in progress.
    Validating,
    /// Last submit failed validation; nothing was written.
    Rejected(ValidationError),
    /// Order recorded and cart cleared. Terminal.
    Placed(Order),
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Editing => "editing",
            CheckoutState::Validating => "validating",
            CheckoutState::Rejected(_) => "rejected",
            CheckoutState::Placed(_) => "placed",
        }
    }
}

/// One order-in-progress, driven by form edits and submits.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    state: CheckoutState,
    fields: CheckoutFields,
}

impl CheckoutFlow {
    /// Start a checkout with an empty form.
    pub fn new() -> Self {
        Self::with_fields(CheckoutFields::default())
    }

    /// Start a checkout with a prefilled form.
    pub fn with_fields(fields: CheckoutFields) -> Self {
        Self {
            state: CheckoutState::Editing,
            fields,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn fields(&self) -> &CheckoutFields {
        &self.fields
    }

    /// Change the form. A rejected checkout goes back to editing.
    pub fn edit(&mut self, f: impl FnOnce(&mut CheckoutFields)) -> Result<(), CommerceError> {
        if let CheckoutState::Placed(_) = self.state {
            return Err(self.transition_error("editing"));
        }
        f(&mut self.fields);
        self.state = CheckoutState::Editing;
        Ok(())
    }

    /// Validate the form against the cart and, if it passes, place the
    /// order.
    ///
    /// A validation failure moves to `Rejected` and is returned as
    /// `CommerceError::Validation`. A storage failure returns to `Editing`
    /// with the cart untouched.
    pub fn submit(
        &mut self,
        service: &OrderService,
        cart: &mut CartStore,
    ) -> Result<Order, CommerceError> {
        if let CheckoutState::Placed(_) = self.state {
            return Err(self.transition_error("validating"));
        }
        self.state = CheckoutState::Validating;

        let checkout = match OrderService::validate(&self.fields, cart.cart().items()) {
            Ok(checkout) => checkout,
            Err(reason) => {
                tracing::debug!(%reason, "checkout rejected");
                self.state = CheckoutState::Rejected(reason);
                return Err(reason.into());
            }
        };

        match service.place_order(checkout, cart) {
            Ok(order) => {
                self.state = CheckoutState::Placed(order.clone());
                Ok(order)
            }
            Err(e) => {
                self.state = CheckoutState::Editing;
                Err(e)
            }
        }
    }

    /// The placed order, once there is one.
    pub fn order(&self) -> Option<&Order> {
        match &self.state {
            CheckoutState::Placed(order) => Some(order),
            _ => None,
        }
    }

    /// Reason for the last rejection, while rejected.
    pub fn rejection(&self) -> Option<ValidationError> {
        match self.state {
            CheckoutState::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.state, CheckoutState::Placed(_))
    }

    fn transition_error(&self, to: &str) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.state.as_str().to_string(),
            to: to.to_string(),
        }
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}
