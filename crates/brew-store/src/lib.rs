//! Type-safe key-value persistence layer for BrewAura.
//!
//! Stands in for browser local storage: every value is a JSON document
//! stored under a string key, and unreadable data is never fatal.
//!
//! # Example
//!
//! ```rust
//! use brew_store::{keys, Store};
//!
//! let store = Store::in_memory();
//!
//! // Store a value
//! store.set(keys::CART, &vec!["espresso".to_string()]).unwrap();
//!
//! // Retrieve it, falling back to the default when absent or corrupt
//! let cart: Vec<String> = store.load_or_default(keys::CART);
//! assert_eq!(cart, vec!["espresso".to_string()]);
//!
//! // Delete it
//! store.delete(keys::CART).unwrap();
//! ```

mod backend;
mod error;
mod kv;

pub mod keys;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::keys;
    pub use crate::{FileBackend, KvBackend, MemoryBackend, Store, StoreError};
}
