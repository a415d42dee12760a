//! Save button state.

use std::time::{Duration, Instant};

/// How long the confirmation stays visible after a save.
pub const DEFAULT_CONFIRMATION: Duration = Duration::from_secs(3);

/// Visible state of the capture affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// Ready to capture
    Idle,
    /// Capture in flight
    Uploading,
    /// Capture stored; reverts to idle after the confirmation period
    Saved,
}

impl IndicatorState {
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorState::Idle => "EXTRACT_DATA",
            IndicatorState::Uploading => "UPLOADING...",
            IndicatorState::Saved => "SAVED_OK \u{2713}",
        }
    }
}

/// The single save affordance of a page.
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    state: IndicatorState,
    saved_until: Option<Instant>,
    confirmation: Duration,
}

impl SaveIndicator {
    pub fn new(confirmation: Duration) -> Self {
        Self {
            state: IndicatorState::Idle,
            saved_until: None,
            confirmation,
        }
    }

    pub fn begin(&mut self) {
        self.state = IndicatorState::Uploading;
        self.saved_until = None;
    }

    /// Switch to the confirmation state until `now + confirmation`.
    pub fn confirm(&mut self, now: Instant) {
        self.state = IndicatorState::Saved;
        self.saved_until = Some(now + self.confirmation);
    }

    pub fn reset(&mut self) {
        self.state = IndicatorState::Idle;
        self.saved_until = None;
    }

    /// State as seen at `now`; an expired confirmation reads as idle.
    pub fn state_at(&self, now: Instant) -> IndicatorState {
        match (self.state, self.saved_until) {
            (IndicatorState::Saved, Some(until)) if now >= until => IndicatorState::Idle,
            (state, _) => state,
        }
    }
}

impl Default for SaveIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION)
    }
}
