//! JSON-file session store.
//!
//! The store is a single JSON document with two keys:
//!
//! - `chats`: captured sessions, newest first
//! - `autoSave`: whether pages being watched are re-captured automatically
//!
//! Every mutation reads the whole document, changes it and writes it back
//! through a temporary file that is renamed over the original. The
//! read-modify-write runs under a [`StoreLock`] so concurrent writers (a
//! `watch` and a `capture` on the same store) do not lose each other's
//! changes. Reads take no lock; the rename keeps them consistent.

mod error;
mod lock;

pub use error::StoreError;
pub use lock::StoreLock;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{ChatSession, SessionDraft};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Default file name inside the data directory.
pub const STORE_FILE_NAME: &str = "chats.json";

/// On-disk layout of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub chats: Vec<ChatSession>,
    #[serde(default, rename = "autoSave")]
    pub auto_save: bool,
}

/// Handle to a store file.
#[derive(Debug, Clone)]
pub struct ChatStore {
    path: PathBuf,
}

impl ChatStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location: `<data_dir>/chat-archiver/chats.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("chat-archiver").join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store with defaults (`chats: []`, `autoSave: false`) if missing.
    ///
    /// Returns whether a new file was written.
    pub fn initialize(&self) -> StoreResult<bool> {
        let _lock = StoreLock::acquire(&self.path)?;
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&StoreData::default())?;
        tracing::info!(path = %self.path.display(), "initialized chat store");
        Ok(true)
    }

    /// Read the store. A missing file reads as an empty store.
    pub fn load(&self) -> StoreResult<StoreData> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreData::default()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(StoreData::default());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Locked read-modify-write. `apply` sees the current document; it is
    /// saved only when `apply` succeeds.
    fn update<T>(&self, apply: impl FnOnce(&mut StoreData) -> StoreResult<T>) -> StoreResult<T> {
        let _lock = StoreLock::acquire(&self.path)?;
        let mut data = self.load()?;
        let result = apply(&mut data)?;
        self.save(&data)?;
        Ok(result)
    }

    fn save(&self, data: &StoreData) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(data)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }

    /// Insert a captured draft as a new session at the front of the list.
    ///
    /// Assigns a time-ordered unique id and the capture timestamp. A draft
    /// without a title gets `Chat - <local date>`.
    pub fn insert(&self, draft: SessionDraft) -> StoreResult<ChatSession> {
        let session = self.update(|data| {
            let now = Utc::now();

            let title = draft
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| fallback_title(now));

            let session = ChatSession {
                id: next_id(&data.chats, now),
                website: draft.website,
                url: draft.url,
                title,
                messages: draft.messages,
                timestamp: now,
            };

            data.chats.insert(0, session.clone());
            Ok(session)
        })?;

        tracing::info!(
            id = %session.id,
            website = %session.website,
            messages = session.messages.len(),
            "saved chat"
        );
        Ok(session)
    }

    /// All sessions, newest first.
    pub fn list(&self) -> StoreResult<Vec<ChatSession>> {
        Ok(self.load()?.chats)
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<ChatSession>> {
        Ok(self.load()?.chats.into_iter().find(|c| c.id == id))
    }

    /// Change a session's title.
    ///
    /// A blank title keeps the current one. Returns the resulting title.
    pub fn rename(&self, id: &str, title: &str) -> StoreResult<String> {
        self.update(|data| {
            let session = data
                .chats
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

            let title = title.trim();
            if !title.is_empty() {
                session.title = title.to_string();
            }
            Ok(session.title.clone())
        })
    }

    /// Remove a session.
    pub fn delete(&self, id: &str) -> StoreResult<ChatSession> {
        self.update(|data| {
            let index = data
                .chats
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
            Ok(data.chats.remove(index))
        })
    }

    pub fn auto_save(&self) -> StoreResult<bool> {
        Ok(self.load()?.auto_save)
    }

    pub fn set_auto_save(&self, enabled: bool) -> StoreResult<()> {
        self.update(|data| {
            data.auto_save = enabled;
            Ok(())
        })
    }
}

/// Millisecond id, bumped past the newest existing id so ids stay unique
/// and increasing even for captures within the same millisecond.
fn next_id(chats: &[ChatSession], now: DateTime<Utc>) -> String {
    let candidate = now.timestamp_millis();
    let newest = chats
        .iter()
        .filter_map(|c| c.id.parse::<i64>().ok())
        .max()
        .unwrap_or(i64::MIN);

    candidate.max(newest.saturating_add(1)).to_string()
}

fn fallback_title(now: DateTime<Utc>) -> String {
    format!(
        "Chat - {}",
        now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    )
}
