//! One-shot capture of a saved page.

use std::path::PathBuf;

use anyhow::{Context, Result};

use chat_archiver::capture::{AdapterRegistry, CaptureController, CaptureOutcome};
use chat_archiver::cli::PageArgs;
use chat_archiver::theme::{current_theme, Theme};
use chat_archiver::transport::StoreBus;
use chat_archiver::Page;

use super::open_store;

pub fn handle(store: Option<PathBuf>, args: PageArgs) -> Result<()> {
    let (config, store) = open_store(store)?;
    let page = Page::load(&args.file, args.url.as_deref())
        .with_context(|| format!("Failed to load page {}", args.file.display()))?;

    let registry = AdapterRegistry::new();
    let bus = StoreBus::new(store);
    let mut controller = CaptureController::new(&registry, &page, &bus)
        .with_confirmation(config.capture.confirmation());

    let outcome = controller.run(&page)?;
    let label = controller.indicator_state().label();
    report(&current_theme(), &outcome, label);
    Ok(())
}

/// Print a capture outcome.
pub fn report(theme: &Theme, outcome: &CaptureOutcome, label: &str) {
    match outcome {
        CaptureOutcome::Saved { .. } => {
            println!(
                "{} {}",
                theme.success_text(label),
                theme.primary_text(&outcome.message())
            );
        }
        CaptureOutcome::Unsupported | CaptureOutcome::NothingToSave => {
            println!("{}", theme.warning_text(&outcome.message()));
        }
    }
}
