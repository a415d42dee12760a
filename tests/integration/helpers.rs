//! Shared fixtures for integration tests.

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

use chat_archiver::{ChatStore, Page};

/// Directory holding the saved-page fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Read a fixture file.
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Parse a fixture as a page, detecting its address from the markup.
pub fn fixture_page(name: &str) -> Page {
    Page::parse(&load_fixture(name), None).expect("fixture should parse")
}

/// A store in a fresh temporary directory.
pub fn temp_store() -> (TempDir, ChatStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = ChatStore::new(dir.path().join("chats.json"));
    (dir, store)
}

/// Isolated environment for running the binary: its own store and a config
/// path that does not exist.
pub struct CliEnv {
    pub dir: TempDir,
}

impl CliEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("chats.json")
    }

    pub fn store(&self) -> ChatStore {
        ChatStore::new(self.store_path())
    }

    /// Command for the binary with `--store` and config isolation applied.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_chat-archiver"));
        cmd.arg("--store")
            .arg(self.store_path())
            .env("CHAT_ARCHIVER_CONFIG", self.dir.path().join("config.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .current_dir(self.dir.path());
        cmd
    }
}
