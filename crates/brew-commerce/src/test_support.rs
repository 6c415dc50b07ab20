//! Shared test helpers.

use brew_store::{KvBackend, MemoryBackend, Store, StoreError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Memory backend whose writes can be made to fail on demand.
#[derive(Default)]
pub(crate) struct FlakyBackend {
    inner: MemoryBackend,
    fail_all: AtomicBool,
    fail_key: Mutex<Option<String>>,
}

impl FlakyBackend {
    /// Fail every write while set.
    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Fail writes to one key only.
    pub(crate) fn fail_writes_to(&self, key: Option<&str>) {
        *self.fail_key.lock().unwrap() = key.map(str::to_string);
    }

    fn check(&self, key: &str) -> Result<(), StoreError> {
        let keyed = self.fail_key.lock().unwrap().as_deref() == Some(key);
        if keyed || self.fail_all.load(Ordering::SeqCst) {
            return Err(StoreError::StoreError(format!("injected failure writing {key}")));
        }
        Ok(())
    }
}

impl KvBackend for FlakyBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.keys()
    }
}

pub(crate) fn flaky_store() -> (Store, Arc<FlakyBackend>) {
    let backend = Arc::new(FlakyBackend::default());
    (Store::new(backend.clone()), backend)
}
