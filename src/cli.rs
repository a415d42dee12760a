//! Command-line interface definitions.
//!
//! Lives in the library so the `xtask` crate can render man pages and shell
//! completions from the same definitions the binary parses.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::export::ExportFormat;

/// Version shown by `--version`: the package version, plus the commit hash
/// outside release builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ")"
);
#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(not(feature = "release"))]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ")\nbuilt ",
    env!("CHAT_ARCHIVER_BUILD_DATE")
);
#[cfg(feature = "release")]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nbuilt ",
    env!("CHAT_ARCHIVER_BUILD_DATE")
);

#[derive(Debug, Parser)]
#[command(
    name = "chat-archiver",
    version = VERSION,
    long_version = LONG_VERSION,
    about = "Capture AI chat transcripts from saved web pages and export them",
    long_about = "Capture AI chat transcripts from saved web pages and export them.\n\n\
                  Supported sites: ChatGPT, Google Gemini, DeepSeek. Captured chats are kept \
                  in a local JSON store and can be exported as text, markdown, JSON or a \
                  printable HTML view."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Chat store file (overrides [storage] path from the config)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Capture the conversation from a saved chat page
    Capture(PageArgs),

    /// Re-capture a saved page whenever it changes (requires autosave on)
    Watch(WatchArgs),

    /// List stored chats, newest first
    #[command(alias = "ls")]
    List {
        /// Print the store as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rename a stored chat
    Rename {
        /// Chat id
        id: String,
        /// New title; blank keeps the current one
        title: String,
    },

    /// Delete a stored chat
    #[command(alias = "rm")]
    Delete {
        /// Chat id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export a stored chat as txt, md or json
    Export {
        /// Chat id
        id: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Md)]
        format: ExportFormat,
        /// Output file or directory (default: current directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Write to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Write a printable HTML view of a stored chat
    Print {
        /// Chat id
        id: Option<String>,
        /// Output file (default: a file in the system temp directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Open the view in the default browser, which prints it once loaded
        #[arg(long)]
        open: bool,
    },

    /// Show or change the autosave setting
    Autosave {
        /// New state; omit to show the current one
        #[arg(value_enum)]
        state: Option<Toggle>,
    },

    /// List supported chat sites
    Sites,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// A saved page and where it came from.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Saved HTML page
    pub file: PathBuf,

    /// Page address, when the saved file does not record one
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Quiet period in seconds before re-capturing (default from config)
    #[arg(long, value_name = "SECS")]
    pub delay: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_carries_package_version_and_build_info() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(VERSION));
        assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        #[cfg(not(feature = "release"))]
        assert!(VERSION.ends_with(')'), "commit hash missing: {}", VERSION);
        assert!(LONG_VERSION.contains("built "));
    }

    #[test]
    fn parses_export_with_global_store() {
        let cli = Cli::try_parse_from([
            "chat-archiver",
            "export",
            "123",
            "--format",
            "json",
            "--store",
            "/tmp/chats.json",
        ])
        .unwrap();

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/chats.json")));
        match cli.command {
            Commands::Export { id, format, .. } => {
                assert_eq!(id, "123");
                assert_eq!(format, ExportFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn print_id_is_optional() {
        let cli = Cli::try_parse_from(["chat-archiver", "print"]).unwrap();
        assert!(matches!(cli.command, Commands::Print { id: None, .. }));
    }

    #[test]
    fn export_output_conflicts_with_stdout() {
        let result =
            Cli::try_parse_from(["chat-archiver", "export", "1", "--stdout", "-o", "out.md"]);
        assert!(result.is_err());
    }
}
