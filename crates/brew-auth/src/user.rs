//! User types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shortest password accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name.
    pub name: String,
    /// Email address, unique across the registry.
    pub email: String,
    /// Stored as entered.
    pub password: String,
    /// When the account was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }

    /// Check a login attempt against this account.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// The session record for this account.
    pub fn to_current(&self) -> CurrentUser {
        CurrentUser {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The logged-in user as kept in the session. Never holds the password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
    pub email: String,
}

impl CurrentUser {
    /// First word of the name, for the navigation bar.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Uppercased first letter of the name, for the avatar.
    pub fn initial(&self) -> String {
        self.name
            .trim_start()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}
