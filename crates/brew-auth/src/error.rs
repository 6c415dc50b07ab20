//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
///
/// Every variant except `Storage` carries text meant for the customer.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required form field was blank.
    #[error("Please fill in all fields")]
    MissingFields,

    /// Password too short.
    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Email already registered.
    #[error("Email already registered. Please login instead.")]
    UserAlreadyExists(String),

    /// Invalid credentials provided.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Persistence failure.
    #[error("storage error: {0}")]
    Storage(#[from] brew_store::StoreError),
}

impl AuthError {
    /// Message suitable for the notification layer, if the customer can
    /// act on this error.
    pub fn user_message(&self) -> Option<String> {
        match self {
            AuthError::Storage(_) => None,
            other => Some(other.to_string()),
        }
    }
}
