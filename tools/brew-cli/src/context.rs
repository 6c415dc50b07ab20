//! CLI execution context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use brew_auth::SessionStore;
use brew_commerce::prelude::*;
use brew_store::Store;

use crate::config::{BackendKind, CliConfig, DATA_DIR_ENV};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// The menu.
    pub catalog: PriceCatalog,
    store: Store,
}

impl Context {
    /// Open the configured store.
    pub fn open(
        config: CliConfig,
        config_path: Option<PathBuf>,
        cwd: PathBuf,
        output: Output,
    ) -> Result<Self> {
        let store = match config.store.backend {
            BackendKind::File => {
                let dir = config
                    .store
                    .resolve_data_dir(&cwd, std::env::var_os(DATA_DIR_ENV));
                tracing::debug!(dir = %dir.display(), "opening file store");
                Store::open_dir(&dir)
                    .with_context(|| format!("Failed to open data directory: {}", dir.display()))?
            }
            BackendKind::Memory => {
                tracing::debug!("using in-memory store");
                Store::in_memory()
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            catalog: PriceCatalog::standard(),
            store,
        })
    }

    /// The data directory in effect for the file backend.
    pub fn data_dir(&self) -> PathBuf {
        self.config
            .store
            .resolve_data_dir(&self.cwd, std::env::var_os(DATA_DIR_ENV))
    }

    /// The persisted cart, with the badge count logged on every change.
    pub fn cart(&self) -> CartStore {
        let mut cart = CartStore::load(self.store.clone());
        cart.subscribe(|items| {
            let count: i64 = items.iter().map(|i| i.quantity).sum();
            tracing::debug!(count, "cart changed");
        });
        cart
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.store.clone())
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::new(self.store.clone())
    }
}
