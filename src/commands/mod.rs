//! Subcommand handlers.

pub mod autosave;
pub mod capture;
pub mod completions;
pub mod config;
pub mod delete;
pub mod export;
pub mod list;
pub mod print;
pub mod rename;
pub mod sites;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};

use chat_archiver::{ChatStore, Config};

/// Load the config and resolve the store, honoring `--store`.
///
/// A store that does not exist yet is created with its defaults.
pub fn open_store(store_override: Option<PathBuf>) -> Result<(Config, ChatStore)> {
    let config = Config::load().context("Failed to load configuration")?;
    let store = match store_override {
        Some(path) => ChatStore::new(path),
        None => config.store()?,
    };
    tracing::debug!(path = %store.path().display(), "using chat store");
    store
        .initialize()
        .with_context(|| format!("Failed to initialize {}", store.path().display()))?;
    Ok((config, store))
}
