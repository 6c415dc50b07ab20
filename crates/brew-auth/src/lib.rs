//! Accounts and login session for the BrewAura storefront.
//!
//! Registered users and the current session live in the same key-value
//! store as the cart. Passwords are kept in cleartext: this is a
//! single-device prototype with no security model, and nothing here
//! should be mistaken for one.

mod error;
mod registry;
mod session;
mod user;

pub use error::AuthError;
pub use registry::UserRegistry;
pub use session::SessionStore;
pub use user::{CurrentUser, User, MIN_PASSWORD_LEN};
