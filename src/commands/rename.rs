use std::path::PathBuf;

use anyhow::Result;

use chat_archiver::theme::current_theme;

use super::open_store;

pub fn handle(store: Option<PathBuf>, id: &str, title: &str) -> Result<()> {
    let (_config, store) = open_store(store)?;
    let title = store.rename(id, title)?;

    let theme = current_theme();
    println!(
        "{} {}",
        theme.success_text("Renamed"),
        theme.primary_text(&format!("{} to \"{}\"", id, title))
    );
    Ok(())
}
