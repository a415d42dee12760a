//! Captured conversation data model.
//!
//! A [`ChatSession`] is created exactly once, when a capture succeeds, and is
//! afterwards only renamed or deleted. Messages keep conversational order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Parse the role names used by chat sites (`user`, `assistant`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Human-readable label with an emoji prefix, used by Markdown and print output.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "🧑 User",
            Role::Assistant => "🤖 Assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Visible text, trimmed and whitespace-normalized. Never empty.
    pub text: String,
    /// Normalized markup. Absent for sessions saved before it was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>, html: Option<String>) -> Self {
        Self {
            role,
            text: text.into(),
            html,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, None)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text, None)
    }

    /// Attach a normalized HTML payload.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

/// Payload handed from a capture to the store.
///
/// `id` and `timestamp` are assigned by the store when the draft is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub website: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub messages: Vec<Message>,
}

/// A persisted conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub website: String,
    pub url: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub timestamp: DateTime<Utc>,
}

impl ChatSession {
    /// Number of messages authored by the given role.
    pub fn count_by_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}
