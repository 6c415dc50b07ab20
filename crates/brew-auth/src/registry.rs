//! Registered users.

use crate::{AuthError, User};
use brew_store::{keys, Store};

/// Persisted list of accounts, keyed by unique email. Grows only by signup.
#[derive(Debug, Clone)]
pub struct UserRegistry {
    store: Store,
}

impl UserRegistry {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All accounts in signup order. Unreadable data reads as empty.
    pub fn all(&self) -> Vec<User> {
        self.store.load_or_default(keys::USERS)
    }

    /// Look up an account by email.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.all().into_iter().find(|u| u.email == email)
    }

    /// Find the account matching both email and password.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        self.all().into_iter().find(|u| u.matches(email, password))
    }

    /// Append a new account.
    pub fn register(&self, user: User) -> Result<(), AuthError> {
        let mut users = self.all();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists(user.email));
        }
        users.push(user);
        self.store.set(keys::USERS, &users)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_find() {
        let registry = UserRegistry::new(Store::in_memory());
        registry
            .register(User::new("Asha", "asha@example.com", "secret1"))
            .unwrap();

        assert!(registry.find_by_email("asha@example.com").is_some());
        assert!(registry.find_by_email("ravi@example.com").is_none());
        assert!(registry.authenticate("asha@example.com", "secret1").is_some());
        assert!(registry.authenticate("asha@example.com", "wrong").is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let registry = UserRegistry::new(Store::in_memory());
        registry
            .register(User::new("Asha", "asha@example.com", "secret1"))
            .unwrap();
        let result = registry.register(User::new("Other", "asha@example.com", "another"));
        assert!(matches!(result, Err(AuthError::UserAlreadyExists(_))));
        assert_eq!(registry.all().len(), 1);
    }
}
