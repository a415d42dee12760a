use anyhow::Result;

use chat_archiver::capture::AdapterRegistry;
use chat_archiver::theme::current_theme;

pub fn handle() -> Result<()> {
    let theme = current_theme();
    let registry = AdapterRegistry::new();

    for adapter in registry.adapters() {
        println!(
            "{}  {}",
            theme.accent_text(adapter.name()),
            theme.secondary_text(&adapter.hosts().join(", "))
        );
    }
    Ok(())
}
