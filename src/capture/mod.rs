//! Chat capture from saved pages.
//!
//! A page is matched against the registered site adapters; the first adapter
//! that recognizes it extracts the conversation as role-tagged messages,
//! each carrying visible text and a normalized HTML rendering. The
//! controller hands the result to storage over the message bus.
//!
//! # Module Structure
//!
//! - [`adapters`] - Site-specific detection and extraction
//! - [`registry`] - Ordered adapter selection
//! - [`normalize`] - HTML cleanup transforms applied to a detached copy
//! - [`dedupe`] - Consecutive repeat suppression
//! - [`controller`] - Capture orchestration and outcomes
//! - [`indicator`] - Save affordance state
//! - [`autosave`] - Debounced re-capture

pub mod adapters;
pub mod autosave;
pub mod controller;
pub mod dedupe;
pub mod indicator;
pub mod normalize;
pub mod registry;

// Re-export main types
pub use adapters::{ChatGptAdapter, DeepSeekAdapter, GeminiAdapter, SiteAdapter};
pub use autosave::{run_debounced, Debouncer, DEFAULT_AUTOSAVE_DELAY};
pub use controller::{CaptureController, CaptureError, CaptureOutcome};
pub use indicator::{IndicatorState, SaveIndicator};
pub use normalize::{ContentNormalizer, Transform};
pub use registry::AdapterRegistry;
