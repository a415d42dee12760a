//! Debounced autosave of a page that keeps changing on disk.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use chat_archiver::capture::{run_debounced, AdapterRegistry, CaptureController, CaptureOutcome};
use chat_archiver::cli::WatchArgs;
use chat_archiver::theme::current_theme;
use chat_archiver::transport::StoreBus;
use chat_archiver::Page;

use super::capture::report;
use super::open_store;

#[cfg(not(tarpaulin_include))]
pub fn handle(store: Option<PathBuf>, args: WatchArgs) -> Result<()> {
    let theme = current_theme();
    let (config, store) = open_store(store)?;

    if !store.auto_save()? {
        bail!("Autosave is off. Enable it with `chat-archiver autosave on`.");
    }

    let file = args.page.file.clone();
    let url = args.page.url.clone();
    let delay = args
        .delay
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.capture.autosave_delay());

    let page = load(&file, url.as_deref())?;
    let registry = AdapterRegistry::new();
    let bus = StoreBus::new(store);
    let mut controller = CaptureController::new(&registry, &page, &bus)
        .with_confirmation(config.capture.confirmation());

    let Some(adapter) = controller.adapter() else {
        println!("{}", theme.warning_text(&CaptureOutcome::Unsupported.message()));
        return Ok(());
    };

    let (tx, rx) = mpsc::channel();
    let _watcher = watch_file(&file, tx)?;

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    println!(
        "{}",
        theme.primary_text(&format!(
            "Watching {} ({}), saving {}s after the last change. Press Ctrl-C to stop.",
            file.display(),
            adapter.name(),
            delay.as_secs()
        ))
    );

    run_debounced(&rx, delay, &stop, || match load(&file, url.as_deref()) {
        Ok(page) => match controller.run(&page) {
            Ok(outcome) => report(&theme, &outcome, controller.indicator_state().label()),
            Err(e) => eprintln!("{} {}", theme.error_text("error:"), e),
        },
        Err(e) => tracing::warn!(error = %e, "could not reload page"),
    });

    println!("{}", theme.secondary_text("Stopped watching."));
    Ok(())
}

fn load(file: &Path, url: Option<&str>) -> Result<Page> {
    Page::load(file, url).with_context(|| format!("Failed to load page {}", file.display()))
}

/// Watch the file's directory and forward events that touch the file.
///
/// Watching the directory keeps working when the file is replaced rather
/// than modified in place.
fn watch_file(file: &Path, tx: Sender<()>) -> Result<RecommendedWatcher> {
    let target = file
        .file_name()
        .map(|name| name.to_os_string())
        .with_context(|| format!("Not a file: {}", file.display()))?;
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if is_page_change(&event, &target) {
                let _ = tx.send(());
            }
        }
        Err(e) => tracing::warn!(error = %e, "file watch error"),
    })
    .context("Failed to create file watcher")?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", dir.display()))?;
    Ok(watcher)
}

/// A create or modify event on a path named `target`.
fn is_page_change(event: &Event, target: &OsStr) -> bool {
    let touches_target = event
        .paths
        .iter()
        .any(|path| path.file_name() == Some(target));
    touches_target && (event.kind.is_modify() || event.kind.is_create())
}
