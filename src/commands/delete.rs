//! Deleting a stored chat.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use chat_archiver::store::StoreError;
use chat_archiver::theme::current_theme;

use super::open_store;

pub fn handle(store: Option<PathBuf>, id: &str, yes: bool) -> Result<()> {
    let (_config, store) = open_store(store)?;
    let theme = current_theme();

    let Some(chat) = store.get(id)? else {
        return Err(StoreError::NotFound { id: id.to_string() }.into());
    };

    if !yes && !prompt_confirmation(&format!("Delete \"{}\" ({})?", chat.title, chat.id))? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    let removed = store.delete(id)?;
    println!(
        "{} {}",
        theme.success_text("Deleted"),
        theme.primary_text(&format!("\"{}\" ({})", removed.title, removed.id))
    );
    Ok(())
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: use --yes to delete without a prompt")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
