//! Writing a printable view of a stored chat.

use std::path::PathBuf;

use anyhow::{bail, Result};

use chat_archiver::print::{publish, PrintRenderer, PrintTrigger, PrintView, SystemOpener};
use chat_archiver::theme::current_theme;

use super::open_store;

pub fn handle(store: Option<PathBuf>, id: Option<&str>, output: Option<PathBuf>, open: bool) -> Result<()> {
    let (config, store) = open_store(store)?;
    let renderer = PrintRenderer::new(config.print.settle_delay());
    let view = renderer.view(&store, id)?;

    let PrintView::Document { file_name, .. } = &view else {
        bail!("{}", view.notice().unwrap_or_default());
    };

    let path = output.unwrap_or_else(|| std::env::temp_dir().join(file_name));
    let opener = SystemOpener::new();
    let trigger: Option<&dyn PrintTrigger> = if open { Some(&opener) } else { None };
    let opened = publish(&view, &path, trigger)?;

    let theme = current_theme();
    println!(
        "{} {}",
        theme.success_text("Wrote"),
        theme.primary_text(&path.display().to_string())
    );
    if !opened {
        println!(
            "{}",
            theme.secondary_text("Open it in a browser to print, or rerun with --open.")
        );
    }
    Ok(())
}
