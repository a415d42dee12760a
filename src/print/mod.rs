//! Printable HTML view of a stored session.
//!
//! The view is a standalone document: the title block, a source/date line,
//! then one block per message. Messages with a normalized HTML payload are
//! embedded as-is so tables and native MathML survive into the print; older
//! messages without one fall back to their escaped text. The document asks
//! the browser to print itself once rendering has had time to settle.

mod opener;

pub use opener::{PrintTrigger, SystemOpener};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::export::format_date;
use crate::files::filename::print_file_name;
use crate::session::ChatSession;
use crate::store::{ChatStore, StoreError};

/// Delay before the embedded print call runs.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(600);

const MISSING_ID_NOTICE: &str = "No chat ID provided.";
const NOT_FOUND_NOTICE: &str = "Chat not found in local storage.";

const STYLE: &str = r#"body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; max-width: 820px; margin: 40px auto; padding: 0 24px; color: #1f2328; line-height: 1.6; }
h1 { margin-bottom: 4px; }
.meta { color: #656d76; font-size: 0.9em; margin-bottom: 32px; white-space: pre; }
.message { margin-bottom: 24px; padding: 16px; border-radius: 8px; page-break-inside: avoid; }
.message.user { background: #f6f8fa; }
.message.assistant { border: 1px solid #d0d7de; }
.role { font-weight: 600; margin-bottom: 8px; }
.content pre { background: #f6f8fa; padding: 12px; overflow-x: auto; white-space: pre-wrap; }
.content table { border-collapse: collapse; }
.content th, .content td { border: 1px solid #d0d7de; padding: 4px 8px; }
@media print { body { margin: 0; } }"#;

/// Errors that can occur while producing a print view.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}")]
    OpenerFailed { command: String, status: String },
}

/// Outcome of resolving a print request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintView {
    /// Printable document for a found session.
    Document { html: String, file_name: String },
    /// No id was supplied.
    MissingId,
    /// The id does not name a stored session.
    NotFound,
}

impl PrintView {
    /// Whether the view embeds a print trigger.
    pub fn is_printable(&self) -> bool {
        matches!(self, PrintView::Document { .. })
    }

    /// The notice shown instead of a document, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            PrintView::Document { .. } => None,
            PrintView::MissingId => Some(MISSING_ID_NOTICE),
            PrintView::NotFound => Some(NOT_FOUND_NOTICE),
        }
    }

    /// Full HTML for the view.
    pub fn to_html(&self) -> String {
        match self {
            PrintView::Document { html, .. } => html.clone(),
            _ => notice_page(self.notice().unwrap_or_default()),
        }
    }
}

/// Builds print views.
#[derive(Debug, Clone)]
pub struct PrintRenderer {
    settle_delay: Duration,
}

impl PrintRenderer {
    pub fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Resolve `id` against the store.
    pub fn view(&self, store: &ChatStore, id: Option<&str>) -> Result<PrintView, PrintError> {
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            return Ok(PrintView::MissingId);
        };

        match store.get(id)? {
            Some(session) => Ok(PrintView::Document {
                html: self.render(&session),
                file_name: print_file_name(&session),
            }),
            None => {
                tracing::warn!(id, "print requested for unknown chat");
                Ok(PrintView::NotFound)
            }
        }
    }

    /// Render the printable document for `session`.
    pub fn render(&self, session: &ChatSession) -> String {
        let title = escape_html(&session.title);
        let mut body = String::new();

        for message in &session.messages {
            let role = message.role.as_str();
            let content = match &message.html {
                Some(html) => html.clone(),
                None => escape_html(&message.text).replace('\n', "<br>"),
            };
            body.push_str(&format!(
                "<div class=\"message {role}\">\n<div class=\"role {role}\">{label}</div>\n<div class=\"content\">{content}</div>\n</div>\n",
                role = role,
                label = message.role.label(),
                content = content,
            ));
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title} - PDF Export</title>\n<style>\n{style}\n</style>\n</head>\n<body>\n<h1 id=\"chat-title\">{title}</h1>\n<div id=\"chat-meta\" class=\"meta\">Source: {website}   |   Date: {date}</div>\n<div id=\"chat-content\">\n{body}</div>\n<script>setTimeout(() => {{ window.print(); }}, {delay});</script>\n</body>\n</html>\n",
            title = title,
            style = STYLE,
            website = escape_html(&session.website),
            date = format_date(&session.timestamp),
            body = body,
            delay = self.settle_delay.as_millis(),
        )
    }
}

impl Default for PrintRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

/// Write `view` to `path` and, for printable views, pass it to `trigger`.
///
/// Returns whether the trigger ran.
pub fn publish(
    view: &PrintView,
    path: &Path,
    trigger: Option<&dyn PrintTrigger>,
) -> Result<bool, PrintError> {
    fs::write(path, view.to_html()).map_err(|source| PrintError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    match trigger {
        Some(trigger) if view.is_printable() => {
            tracing::debug!(path = %path.display(), "opening print view");
            trigger.trigger(path)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn notice_page(notice: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{notice}</title>\n</head>\n<body>\n<h2 style=\"text-align:center; margin-top:50px;\">{notice}</h2>\n</body>\n</html>\n",
        notice = notice
    )
}

/// Escape the characters that would otherwise start markup or entities.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Message, SessionDraft};
    use std::cell::Cell;
    use tempfile::TempDir;

    struct CountingTrigger {
        calls: Cell<usize>,
    }

    impl PrintTrigger for CountingTrigger {
        fn trigger(&self, _path: &Path) -> Result<(), PrintError> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    fn store_with_chat() -> (TempDir, ChatStore, String) {
        let dir = TempDir::new().unwrap();
        let store = ChatStore::new(dir.path().join("chats.json"));
        let session = store
            .insert(SessionDraft {
                website: "ChatGPT".to_string(),
                url: "https://chatgpt.com/c/1".to_string(),
                title: Some("Fish & <Chips>".to_string()),
                messages: vec![
                    Message::user("a < b\nb > c"),
                    Message::assistant("table").with_html("<table><tr><td>1</td></tr></table>"),
                ],
            })
            .unwrap();
        (dir, store, session.id)
    }

    #[test]
    fn document_embeds_payload_and_escapes_legacy_text() {
        let (_dir, store, id) = store_with_chat();
        let view = PrintRenderer::default().view(&store, Some(&id)).unwrap();
        let html = view.to_html();

        assert!(view.is_printable());
        assert!(html.contains("<title>Fish &amp; &lt;Chips&gt; - PDF Export</title>"));
        assert!(html.contains("Source: ChatGPT   |   Date: "));
        assert!(html.contains("a &lt; b<br>b &gt; c"));
        assert!(html.contains("<table><tr><td>1</td></tr></table>"));
        assert!(html.contains("🧑 User"));
        assert!(html.contains("🤖 Assistant"));
        assert!(html.contains("window.print(); }, 600)"));
    }

    #[test]
    fn settle_delay_is_configurable() {
        let (_dir, store, id) = store_with_chat();
        let renderer = PrintRenderer::new(Duration::from_millis(1500));
        let html = renderer.view(&store, Some(&id)).unwrap().to_html();
        assert!(html.contains("}, 1500)"));
    }

    #[test]
    fn missing_and_unknown_ids_render_notices() {
        let (_dir, store, _id) = store_with_chat();
        let renderer = PrintRenderer::default();

        let missing = renderer.view(&store, None).unwrap();
        assert_eq!(missing, PrintView::MissingId);
        assert!(missing.to_html().contains("No chat ID provided."));
        assert!(!missing.to_html().contains("window.print"));

        let blank = renderer.view(&store, Some("  ")).unwrap();
        assert_eq!(blank, PrintView::MissingId);

        let unknown = renderer.view(&store, Some("123")).unwrap();
        assert_eq!(unknown, PrintView::NotFound);
        assert!(unknown.to_html().contains("Chat not found in local storage."));
    }

    #[test]
    fn publish_triggers_only_documents() {
        let (dir, store, id) = store_with_chat();
        let renderer = PrintRenderer::default();
        let trigger = CountingTrigger { calls: Cell::new(0) };
        let path = dir.path().join("print.html");

        let unknown = renderer.view(&store, Some("nope")).unwrap();
        assert!(!publish(&unknown, &path, Some(&trigger)).unwrap());
        assert_eq!(trigger.calls.get(), 0);

        let found = renderer.view(&store, Some(&id)).unwrap();
        assert!(publish(&found, &path, Some(&trigger)).unwrap());
        assert_eq!(trigger.calls.get(), 1);
        assert!(fs::read_to_string(&path).unwrap().contains("PDF Export"));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=\"x\"&gt;&amp;&lt;/a&gt;");
    }
}
