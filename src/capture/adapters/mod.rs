//! Site adapters.
//!
//! Each supported chat site gets one adapter that knows how to recognize the
//! site from its host name and where the site keeps its messages. The markup
//! of these sites is undocumented and changes without notice, so adapters
//! are best-effort signatures.

mod chatgpt;
mod deepseek;
mod gemini;

pub use chatgpt::ChatGptAdapter;
pub use deepseek::DeepSeekAdapter;
pub use gemini::GeminiAdapter;

use kuchikikiki::NodeRef;

use super::dedupe::SuppressRepeats;
use super::normalize::ContentNormalizer;
use crate::page::dom::{query_all, query_first};
use crate::page::text::visible_text;
use crate::page::Page;
use crate::session::{Message, Role};

/// Detection and extraction for one chat site.
pub trait SiteAdapter: Send + Sync {
    /// Display name stored with captured sessions.
    fn name(&self) -> &'static str;

    /// Host name fragments that identify the site.
    fn hosts(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether the page belongs to this site.
    ///
    /// Should be fast - only inspects the page address.
    fn matches(&self, page: &Page) -> bool;

    /// Extract messages in page order.
    ///
    /// Returns an empty vector when nothing matches; that is a normal outcome.
    fn extract(&self, page: &Page) -> Vec<Message>;

    /// Site-specific cleanup of the page title.
    fn clean_title(&self, raw: &str) -> String {
        raw.trim().to_string()
    }
}

/// Get the built-in adapters in registration order.
pub fn builtin_adapters() -> Vec<Box<dyn SiteAdapter>> {
    vec![
        Box::new(ChatGptAdapter::new()),
        Box::new(GeminiAdapter::new()),
        Box::new(DeepSeekAdapter::new()),
    ]
}

/// Whether the page host contains any of the given fragments.
fn host_contains(page: &Page, fragments: &[&str]) -> bool {
    let host = page.host();
    !host.is_empty() && fragments.iter().any(|fragment| host.contains(fragment))
}

/// How an adapter finds and reads its messages.
///
/// Adapters only differ in these rules; the walk itself is shared.
struct ExtractionRules<F>
where
    F: Fn(&NodeRef) -> Option<Role>,
{
    /// Selector for role-bearing message containers.
    containers: &'static str,
    /// Selector for the richest content element inside a container.
    rich_content: &'static str,
    /// Role of a container; `None` skips it.
    role_of: F,
    /// Drop candidates repeating the previous message's text.
    suppress_repeats: bool,
}

fn extract_with<F>(page: &Page, site: &'static str, rules: ExtractionRules<F>) -> Vec<Message>
where
    F: Fn(&NodeRef) -> Option<Role>,
{
    let normalizer = ContentNormalizer::new();
    let containers = query_all(page.document(), rules.containers);
    tracing::debug!(site, containers = containers.len(), "found message containers");

    let mut accepted = SuppressRepeats::new();
    let mut messages = Vec::with_capacity(containers.len());

    for container in &containers {
        let Some(role) = (rules.role_of)(container) else {
            tracing::debug!(site, "skipping container without a supported role");
            continue;
        };

        let content = query_first(container, rules.rich_content).unwrap_or_else(|| container.clone());
        let text = visible_text(&content);
        if text.is_empty() {
            continue;
        }

        let message = Message::new(role, text, Some(normalizer.normalize(&content)));
        if rules.suppress_repeats {
            accepted.push(message);
        } else {
            messages.push(message);
        }
    }

    if rules.suppress_repeats {
        if accepted.suppressed_count() > 0 {
            tracing::debug!(site, suppressed = accepted.suppressed_count(), "dropped repeated messages");
        }
        accepted.into_messages()
    } else {
        messages
    }
}
