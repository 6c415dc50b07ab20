//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing an OrderId where an ItemId is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Menu item identifier, e.g. `"cold-brew"`. Unique within a cart.
    ItemId
);
define_id!(
    /// Order identifier.
    OrderId
);

impl OrderId {
    /// Generate an id for an order created at `created_at`.
    ///
    /// The millisecond timestamp keeps ids roughly sortable; the counter and
    /// random suffix keep two orders placed in the same millisecond apart.
    pub fn generate(created_at: DateTime<Utc>) -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;
        use std::sync::atomic::{AtomicU64, Ordering};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let seq = COUNTER.fetch_add(1, Ordering::Relaxed) % 10_000;
        let bytes: [u8; 6] = rand::thread_rng().gen();
        Self(format!(
            "ord_{}_{:04}_{}",
            created_at.timestamp_millis(),
            seq,
            URL_SAFE_NO_PAD.encode(bytes)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_creation() {
        let id = ItemId::new("espresso");
        assert_eq!(id.as_str(), "espresso");
    }

    #[test]
    fn test_id_from_string() {
        let id: ItemId = "latte".into();
        assert_eq!(id.as_str(), "latte");
        assert_eq!(format!("{}", id), "latte");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ItemId::new("mocha")).unwrap();
        assert_eq!(json, "\"mocha\"");
    }

    #[test]
    fn test_order_id_embeds_timestamp() {
        let now = Utc::now();
        let id = OrderId::generate(now);
        assert!(id
            .as_str()
            .starts_with(&format!("ord_{}_", now.timestamp_millis())));
    }

    #[test]
    fn test_order_ids_unique_within_same_millisecond() {
        let now = Utc::now();
        let ids: HashSet<OrderId> = (0..500).map(|_| OrderId::generate(now)).collect();
        assert_eq!(ids.len(), 500);
    }
}
