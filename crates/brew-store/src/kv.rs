//! Typed key-value store with automatic JSON serialization.

use crate::{FileBackend, KvBackend, MemoryBackend, StoreError};
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Type-safe store over a shared [`KvBackend`].
///
/// Cloning is cheap; every clone sees the same backend. Components that
/// persist state (cart, order history, session) each hold a clone.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Wrap an existing backend.
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Open a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Open a directory-backed store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let store = Store::open_dir(".brewaura")?;
    /// ```
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(Arc::new(FileBackend::open(dir)?)))
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist. A value that fails to parse
    /// is an error here; use [`Store::load_or_default`] for fail-soft reads.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Read a value, substituting the default for anything unusable.
    ///
    /// Missing keys, unreadable storage and corrupt JSON all yield
    /// `T::default()`. Only the latter two are logged.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable persisted value");
                T::default()
            }
        }
    }

    /// Set a value in the store.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.exists(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        quantity: i64,
    }

    #[test]
    fn test_set_and_get() {
        let store = Store::in_memory();
        let items = vec![Item {
            id: "latte".into(),
            quantity: 2,
        }];
        store.set("cart", &items).unwrap();

        let loaded: Option<Vec<Item>> = store.get("cart").unwrap();
        assert_eq!(loaded, Some(items));
    }

    #[test]
    fn test_missing_key_is_default() {
        let store = Store::in_memory();
        let items: Vec<Item> = store.load_or_default("cart");
        assert!(items.is_empty());
    }

    #[test]
    fn test_corrupt_value_is_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("cart", b"{not json").unwrap();
        let store = Store::new(backend);

        assert!(store.get::<Vec<Item>>("cart").is_err());
        let items: Vec<Item> = store.load_or_default("cart");
        assert!(items.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_default() {
        let store = Store::in_memory();
        store.set("cart", &"a string, not a list").unwrap();
        let items: Vec<Item> = store.load_or_default("cart");
        assert!(items.is_empty());
    }

    #[test]
    fn test_clones_share_backend() {
        let store = Store::in_memory();
        let other = store.clone();
        store.set("k", &1).unwrap();
        assert_eq!(other.get::<i32>("k").unwrap(), Some(1));
        other.delete("k").unwrap();
        assert!(!store.exists("k").unwrap());
    }
}
