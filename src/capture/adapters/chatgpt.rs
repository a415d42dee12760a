//! ChatGPT adapter.
//!
//! Every message turn carries a `data-message-author-role` attribute; the
//! rendered answer sits in a `.markdown` element inside it.

use super::{extract_with, host_contains, ExtractionRules, SiteAdapter};
use crate::page::dom::attr;
use crate::page::Page;
use crate::session::{Message, Role};

const HOSTS: &[&str] = &["chatgpt.com", "chat.openai.com"];
const TITLE_SUFFIX: &str = " - ChatGPT";

/// Adapter for chatgpt.com (and the former chat.openai.com).
#[derive(Debug, Clone, Default)]
pub struct ChatGptAdapter;

impl ChatGptAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SiteAdapter for ChatGptAdapter {
    fn name(&self) -> &'static str {
        "ChatGPT"
    }

    fn hosts(&self) -> &'static [&'static str] {
        HOSTS
    }

    fn matches(&self, page: &Page) -> bool {
        host_contains(page, HOSTS)
    }

    fn extract(&self, page: &Page) -> Vec<Message> {
        extract_with(
            page,
            self.name(),
            ExtractionRules {
                containers: "div[data-message-author-role]",
                rich_content: ".markdown",
                role_of: |container| {
                    attr(container, "data-message-author-role")
                        .and_then(|role| Role::from_name(&role))
                },
                suppress_repeats: false,
            },
        )
    }

    fn clean_title(&self, raw: &str) -> String {
        raw.replacen(TITLE_SUFFIX, "", 1).trim().to_string()
    }
}
