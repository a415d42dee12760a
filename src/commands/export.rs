//! Exporting a stored chat to a file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use chat_archiver::export::{self, ExportFormat};
use chat_archiver::store::StoreError;
use chat_archiver::theme::current_theme;

use super::open_store;

pub fn handle(
    store: Option<PathBuf>,
    id: &str,
    format: ExportFormat,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    let (_config, store) = open_store(store)?;
    let session = store
        .get(id)?
        .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

    let content = export::render(&session, format)?;
    if stdout {
        print!("{}", content);
        return Ok(());
    }

    let file_name = export::file_name(&session, format);
    let path = resolve_output(output.as_deref(), &file_name);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    let theme = current_theme();
    println!(
        "{} {}",
        theme.success_text("Exported"),
        theme.primary_text(&format!("{} ({})", path.display(), format.mime_type()))
    );
    Ok(())
}

/// Place `file_name` in `output` when it is a directory; otherwise use
/// `output` itself, or the current directory when absent.
fn resolve_output(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_output_gets_generated_name() {
        let dir = TempDir::new().unwrap();
        let path = resolve_output(Some(dir.path()), "ChatExport_ChatGPT_1.md");
        assert_eq!(path, dir.path().join("ChatExport_ChatGPT_1.md"));
    }

    #[test]
    fn file_output_is_used_verbatim() {
        let path = resolve_output(Some(Path::new("/tmp/out.txt")), "ignored.txt");
        assert_eq!(path, PathBuf::from("/tmp/out.txt"));
        assert_eq!(resolve_output(None, "a.json"), PathBuf::from("a.json"));
    }
}
