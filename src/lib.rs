//! Chat Archiver - capture AI chat transcripts from saved web pages.
//!
//! Saved ChatGPT, Google Gemini and DeepSeek pages are parsed, matched to a
//! site adapter and reduced to role-tagged messages with normalized HTML
//! (KaTeX formulas become native MathML). Captures go through a message bus
//! into a local JSON store, from which chats can be listed, renamed, deleted,
//! exported or rendered as a printable view.

pub mod capture;
pub mod cli;
pub mod config;
pub mod export;
pub mod files;
pub mod page;
pub mod print;
pub mod session;
pub mod store;
pub mod theme;
pub mod transport;

pub use capture::{AdapterRegistry, CaptureController, CaptureOutcome, SiteAdapter};
pub use config::Config;
pub use page::Page;
pub use session::{ChatSession, Message, Role, SessionDraft};
pub use store::ChatStore;
