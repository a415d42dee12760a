use std::path::PathBuf;

use anyhow::Result;

use chat_archiver::cli::Toggle;
use chat_archiver::theme::current_theme;

use super::open_store;

pub fn handle(store: Option<PathBuf>, state: Option<Toggle>) -> Result<()> {
    let (_config, store) = open_store(store)?;

    let enabled = match state {
        Some(toggle) => {
            store.set_auto_save(toggle.enabled())?;
            toggle.enabled()
        }
        None => store.auto_save()?,
    };

    let theme = current_theme();
    let label = if enabled { "on" } else { "off" };
    println!("Autosave is {}", theme.accent_text(label));
    Ok(())
}
