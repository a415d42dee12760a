//! Google Gemini adapter.
//!
//! Gemini renders turns as custom elements: `<user-query>` for prompts and
//! `<model-response>` for answers. The element kind is the role.

use super::{extract_with, host_contains, ExtractionRules, SiteAdapter};
use crate::page::dom::tag_name;
use crate::page::Page;
use crate::session::{Message, Role};

const HOSTS: &[&str] = &["gemini.google.com"];

/// Adapter for gemini.google.com.
#[derive(Debug, Clone, Default)]
pub struct GeminiAdapter;

impl GeminiAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SiteAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "Google Gemini"
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
                containers: "user-query, model-response",
                rich_content: ".markdown, .query-text",
                role_of: |container| match tag_name(container).as_deref() {
                    Some("user-query") => Some(Role::User),
                    _ => Some(Role::Assistant),
                },
                suppress_repeats: false,
            },
        )
    }

    fn clean_title(&self, raw: &str) -> String {
        raw.replacen("Gemini", "Gemini Chat", 1).trim().to_string()
    }
}
