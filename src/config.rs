//! User configuration.
//!
//! Loaded from `$CHAT_ARCHIVER_CONFIG` when set, otherwise from
//! `<config_dir>/chat-archiver/config.toml`. A missing file yields defaults
//! and missing keys fall back per section.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::capture::DEFAULT_AUTOSAVE_DELAY;
use crate::capture::indicator::DEFAULT_CONFIRMATION;
use crate::print::DEFAULT_SETTLE_DELAY;
use crate::store::ChatStore;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "CHAT_ARCHIVER_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the config directory")]
    NoConfigDir,

    #[error("Could not determine a default store location; set [storage] path")]
    NoDataDir,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub print: PrintConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file; defaults to `<data_dir>/chat-archiver/chats.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Quiet period before a watched page is re-captured
    pub autosave_delay_secs: u64,
    /// How long the saved confirmation stays up
    pub confirmation_secs: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            autosave_delay_secs: DEFAULT_AUTOSAVE_DELAY.as_secs(),
            confirmation_secs: DEFAULT_CONFIRMATION.as_secs(),
        }
    }
}

impl CaptureConfig {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_secs(self.autosave_delay_secs)
    }

    pub fn confirmation(&self) -> Duration {
        Duration::from_secs(self.confirmation_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Delay before the print dialog opens
    pub settle_delay_ms: u64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
        }
    }
}

impl PrintConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Config {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config file location.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("chat-archiver").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Write to the default location, creating parent directories.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&path, content).map_err(write_err)?;
        Ok(path)
    }

    /// Store at the configured path, or the platform default.
    pub fn store(&self) -> Result<ChatStore, ConfigError> {
        match &self.storage.path {
            Some(path) => Ok(ChatStore::new(path)),
            None => ChatStore::default_path()
                .map(ChatStore::new)
                .ok_or(ConfigError::NoDataDir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.capture.autosave_delay(), Duration::from_secs(15));
        assert_eq!(config.capture.confirmation(), Duration::from_secs(3));
        assert_eq!(config.print.settle_delay(), Duration::from_millis(600));
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[storage]\npath = \"/tmp/chats.json\"\n\n[capture]\nautosave_delay_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/chats.json")));
        assert_eq!(config.capture.autosave_delay_secs, 5);
        assert_eq!(config.capture.confirmation_secs, 3);
        assert_eq!(config.print.settle_delay_ms, 600);
        assert_eq!(config.store().unwrap().path(), PathBuf::from("/tmp/chats.json"));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[capture\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn serializes_as_toml_sections() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("[capture]"));
        assert!(toml_str.contains("autosave_delay_secs = 15"));
        assert!(toml_str.contains("settle_delay_ms = 600"));
    }
}
