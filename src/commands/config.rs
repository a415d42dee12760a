//! Config subcommands handler

use anyhow::{Context, Result};

use chat_archiver::cli::ConfigCommands;
use chat_archiver::theme::current_theme;
use chat_archiver::Config;

pub fn handle(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => handle_show(),
        ConfigCommands::Edit => handle_edit(),
        ConfigCommands::Path => handle_path(),
    }
}

/// Show current configuration as TOML.
fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(&toml_str));
    Ok(())
}

/// Open configuration file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
#[cfg(not(tarpaulin_include))]
fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let theme = current_theme();

    // Ensure config exists
    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!(
        "{}",
        theme.primary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor {}", editor))?;

    Ok(())
}

fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
