//! Login session.

use crate::{AuthError, CurrentUser, User, UserRegistry, MIN_PASSWORD_LEN};
use brew_store::{keys, Store};

/// Signup, login and logout over the persisted session slot.
///
/// At most one user is logged in at a time. The cart and orders do not
/// depend on who that is.
#[derive(Debug, Clone)]
pub struct SessionStore {
    store: Store,
    registry: UserRegistry,
}

impl SessionStore {
    pub fn new(store: Store) -> Self {
        Self {
            registry: UserRegistry::new(store.clone()),
            store,
        }
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    /// The logged-in user, if any. Unreadable session data reads as
    /// logged out.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.store.load_or_default(keys::SESSION)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// Create an account and log it in.
    ///
    /// Fields are trimmed. Checks, in order: nothing blank, password long
    /// enough, confirmation matches, email not taken.
    pub fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<CurrentUser, AuthError> {
        let (name, email, password, confirm) =
            (name.trim(), email.trim(), password.trim(), confirm.trim());

        if [name, email, password, confirm].iter().any(|f| f.is_empty()) {
            return Err(AuthError::MissingFields);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN));
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let user = User::new(name, email, password);
        let current = user.to_current();
        self.registry.register(user)?;
        self.store.set(keys::SESSION, &current)?;

        tracing::info!(email = %current.email, "account created");
        Ok(current)
    }

    /// Log in with email and password.
    pub fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let (email, password) = (email.trim(), password.trim());
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let user = self
            .registry
            .authenticate(email, password)
            .ok_or(AuthError::InvalidCredentials)?;
        let current = user.to_current();
        self.store.set(keys::SESSION, &current)?;

        tracing::info!(email = %current.email, "logged in");
        Ok(current)
    }

    /// End the session. Logging out while logged out is fine.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.delete(keys::SESSION)?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Greeting after a successful login.
    pub fn welcome_back_message(user: &CurrentUser) -> String {
        format!("Welcome back, {}!", user.name)
    }

    /// Greeting after a successful signup.
    pub fn welcome_message(user: &CurrentUser) -> String {
        format!(
            "Account created successfully! Welcome to BrewAura, {}!",
            user.name
        )
    }

    /// Notice after logout.
    pub fn logout_message() -> &'static str {
        "You have been logged out"
    }
}
