//! Chat Archiver CLI entry point.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chat_archiver::cli::{Cli, Commands};
use chat_archiver::theme::current_theme;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = cli.store.clone();
    let result = match cli.command {
        Commands::Capture(args) => commands::capture::handle(store, args),
        Commands::Watch(args) => commands::watch::handle(store, args),
        Commands::List { json } => commands::list::handle(store, json),
        Commands::Rename { id, title } => commands::rename::handle(store, &id, &title),
        Commands::Delete { id, yes } => commands::delete::handle(store, &id, yes),
        Commands::Export {
            id,
            format,
            output,
            stdout,
        } => commands::export::handle(store, &id, format, output, stdout),
        Commands::Print { id, output, open } => {
            commands::print::handle(store, id.as_deref(), output, open)
        }
        Commands::Autosave { state } => commands::autosave::handle(store, state),
        Commands::Sites => commands::sites::handle(),
        Commands::Config { command } => commands::config::handle(command),
        Commands::Completions { shell } => commands::completions::handle(shell),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let theme = current_theme();
            eprintln!("{} {:#}", theme.error_text("error:"), e);
            ExitCode::FAILURE
        }
    }
}
