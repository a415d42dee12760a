//! Listing stored chats.

use std::path::PathBuf;

use anyhow::Result;

use chat_archiver::export::format_date;
use chat_archiver::theme::current_theme;
use chat_archiver::Role;

use super::open_store;

pub fn handle(store: Option<PathBuf>, json: bool) -> Result<()> {
    let (_config, store) = open_store(store)?;
    let chats = store.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chats)?);
        return Ok(());
    }

    let theme = current_theme();
    if chats.is_empty() {
        println!("{}", theme.primary_text("No saved chats yet."));
        println!(
            "{}",
            theme.secondary_text("Capture one with: chat-archiver capture <saved-page.html>")
        );
        return Ok(());
    }

    println!(
        "{}",
        theme.heading_text(&format!("{} saved chat(s)", chats.len()))
    );
    for chat in &chats {
        println!();
        println!("{}  {}", theme.accent_text(&chat.id), chat.title);
        println!(
            "{}",
            theme.secondary_text(&format!(
                "    {} \u{2022} {} \u{2022} {} user / {} assistant",
                chat.website,
                format_date(&chat.timestamp),
                chat.count_by_role(Role::User),
                chat.count_by_role(Role::Assistant)
            ))
        );
    }
    Ok(())
}
