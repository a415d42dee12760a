//! Adapter selection.

use super::adapters::{builtin_adapters, SiteAdapter};
use crate::page::Page;

/// Ordered set of site adapters.
///
/// Selection is first-match-wins in registration order. Built-in adapters key
/// off distinct host names, so at most one of them ever matches.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn SiteAdapter>>,
}

impl AdapterRegistry {
    /// Create with the built-in adapters.
    pub fn new() -> Self {
        Self {
            adapters: builtin_adapters(),
        }
    }

    /// Create with specific adapters (for testing).
    pub fn with_adapters(adapters: Vec<Box<dyn SiteAdapter>>) -> Self {
        Self { adapters }
    }

    /// Get a reference to the adapters list.
    pub fn adapters(&self) -> &[Box<dyn SiteAdapter>] {
        &self.adapters
    }

    /// The first adapter claiming `page`, if any.
    pub fn select(&self, page: &Page) -> Option<&dyn SiteAdapter> {
        let selected = self
            .adapters
            .iter()
            .find(|adapter| adapter.matches(page))
            .map(|adapter| adapter.as_ref());

        match selected {
            Some(adapter) => tracing::debug!(host = page.host(), site = adapter.name(), "adapter selected"),
            None => tracing::debug!(host = page.host(), "no adapter matches page"),
        }
        selected
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
