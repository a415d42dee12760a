//! Capture orchestration.

use std::time::{Duration, Instant};

use super::adapters::SiteAdapter;
use super::indicator::{IndicatorState, SaveIndicator};
use super::registry::AdapterRegistry;
use crate::page::Page;
use crate::session::SessionDraft;
use crate::transport::{MessageBus, Request, TransportError};

/// Title used when the page title cleans up to nothing.
pub const UNTITLED: &str = "Untitled Chat";

/// Result of one capture run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// No adapter recognizes the page.
    Unsupported,
    /// The adapter matched but found no messages.
    NothingToSave,
    /// The session was handed to storage.
    Saved { id: String, messages: usize },
}

impl CaptureOutcome {
    /// User-facing notice for this outcome.
    pub fn message(&self) -> String {
        match self {
            CaptureOutcome::Unsupported => "This page is not a supported chat site.".to_string(),
            CaptureOutcome::NothingToSave => "No chat messages found to save!".to_string(),
            CaptureOutcome::Saved { id, messages } => {
                format!("Saved {} messages as chat {}", messages, id)
            }
        }
    }
}

/// Errors that end a capture run.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to save: {0}")]
    Transport(#[from] TransportError),
}

/// Runs captures for one page.
///
/// The adapter is chosen once, when the controller is created, and stays the
/// same for the controller's lifetime.
pub struct CaptureController<'a> {
    adapter: Option<&'a dyn SiteAdapter>,
    bus: &'a dyn MessageBus,
    indicator: SaveIndicator,
}

impl<'a> CaptureController<'a> {
    pub fn new(registry: &'a AdapterRegistry, page: &Page, bus: &'a dyn MessageBus) -> Self {
        Self {
            adapter: registry.select(page),
            bus,
            indicator: SaveIndicator::default(),
        }
    }

    /// Set how long the saved confirmation stays visible.
    pub fn with_confirmation(mut self, confirmation: Duration) -> Self {
        self.indicator = SaveIndicator::new(confirmation);
        self
    }

    /// The selected adapter, if the page is supported.
    pub fn adapter(&self) -> Option<&'a dyn SiteAdapter> {
        self.adapter
    }

    pub fn is_supported(&self) -> bool {
        self.adapter.is_some()
    }

    /// Current indicator state.
    pub fn indicator_state(&self) -> IndicatorState {
        self.indicator.state_at(Instant::now())
    }

    /// Extract the page and hand the result to storage.
    pub fn run(&mut self, page: &Page) -> Result<CaptureOutcome, CaptureError> {
        let Some(adapter) = self.adapter else {
            return Ok(CaptureOutcome::Unsupported);
        };

        self.indicator.begin();
        let messages = adapter.extract(page);

        if messages.is_empty() {
            tracing::info!(site = adapter.name(), "no messages found");
            self.indicator.reset();
            return Ok(CaptureOutcome::NothingToSave);
        }

        let count = messages.len();
        let draft = SessionDraft {
            website: adapter.name().to_string(),
            url: page.url().to_string(),
            title: Some(derive_title(adapter, page.title())),
            messages,
        };

        match self.bus.send(&Request::SaveChat(draft)) {
            Ok(response) => {
                self.indicator.confirm(Instant::now());
                Ok(CaptureOutcome::Saved {
                    id: response.id,
                    messages: count,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, site = adapter.name(), "capture could not be saved");
                self.indicator.reset();
                Err(e.into())
            }
        }
    }
}

/// Clean the page title for `adapter`, falling back to [`UNTITLED`].
pub fn derive_title(adapter: &dyn SiteAdapter, raw: &str) -> String {
    let title = adapter.clean_title(raw);
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}
