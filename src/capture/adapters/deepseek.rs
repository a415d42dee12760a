//! DeepSeek adapter.
//!
//! DeepSeek ships hashed class names. Message containers are matched by a
//! known hash or any class containing `message`; a container is a user turn
//! when it holds a user marker element. Both an outer wrapper and its inner
//! message can match, so consecutive repeats are suppressed.

use super::{extract_with, host_contains, ExtractionRules, SiteAdapter};
use crate::page::dom::has_match;
use crate::page::Page;
use crate::session::{Message, Role};

const HOSTS: &[&str] = &["chat.deepseek.com"];

/// Adapter for chat.deepseek.com.
#[derive(Debug, Clone, Default)]
pub struct DeepSeekAdapter;

impl DeepSeekAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SiteAdapter for DeepSeekAdapter {
    fn name(&self) -> &'static str {
        "DeepSeek"
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
                containers: r#".fbb737a4, [class*="message"]"#,
                rich_content: ".ds-markdown",
                role_of: |container| {
                    if has_match(container, r#"[class*="user"], .avatar-user"#) {
                        Some(Role::User)
                    } else {
                        Some(Role::Assistant)
                    }
                },
                suppress_repeats: true,
            },
        )
    }
}
