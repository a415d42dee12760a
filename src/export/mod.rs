//! File exports of stored sessions.
//!
//! Rendering is pure: a session and a format go in, the file body comes out.
//! Plain text and markdown carry only the visible text of each message; the
//! JSON form is the session itself with messages reduced to role and text.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{ChatSession, Role};

/// Date layout used by every rendered view.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the rule under the plain text header.
const TXT_RULE_WIDTH: usize = 50;

/// Errors that can occur during export rendering.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize chat: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Txt,
    Md,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Md => "md",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt | ExportFormat::Md => "text/plain",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Session as it appears in a JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableSession {
    pub id: String,
    pub website: String,
    pub url: String,
    pub title: String,
    pub messages: Vec<PortableMessage>,
    pub timestamp: DateTime<Utc>,
}

/// Message without its HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableMessage {
    pub role: Role,
    pub text: String,
}

impl From<&ChatSession> for PortableSession {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id.clone(),
            website: session.website.clone(),
            url: session.url.clone(),
            title: session.title.clone(),
            messages: session
                .messages
                .iter()
                .map(|m| PortableMessage {
                    role: m.role,
                    text: m.text.clone(),
                })
                .collect(),
            timestamp: session.timestamp,
        }
    }
}

/// Render `session` in `format`.
pub fn render(session: &ChatSession, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Txt => Ok(render_txt(session)),
        ExportFormat::Md => Ok(render_markdown(session)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&PortableSession::from(
            session,
        ))?),
    }
}

fn render_txt(session: &ChatSession) -> String {
    let mut out = format!(
        "Title: {}\r\nWebsite: {}\r\nDate: {}\r\n",
        session.title,
        session.website,
        format_date(&session.timestamp)
    );
    out.push_str(&"=".repeat(TXT_RULE_WIDTH));
    out.push_str("\r\n\r\n");

    for message in &session.messages {
        out.push_str(&format!(
            "[{}]\r\n{}\r\n\r\n",
            message.role.as_str().to_uppercase(),
            message.text
        ));
    }
    out
}

fn render_markdown(session: &ChatSession) -> String {
    let mut out = format!(
        "# {}\n\n**Source:** {}\n**Date:** {}\n\n---\n\n",
        session.title,
        session.website,
        format_date(&session.timestamp)
    );

    for message in &session.messages {
        let heading = match message.role {
            Role::User => "\u{1F9D1} **User**",
            Role::Assistant => "\u{1F916} **Assistant**",
        };
        out.push_str(&format!("### {}\n\n{}\n\n", heading, message.text));
    }
    out
}

/// Download name: `ChatExport_<website without spaces>_<id>.<ext>`.
pub fn file_name(session: &ChatSession, format: ExportFormat) -> String {
    format!(
        "ChatExport_{}_{}.{}",
        session.website.replace(' ', ""),
        session.id,
        format.extension()
    )
}

/// Render a capture time in local time.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format(DATE_FORMAT).to_string()
}
