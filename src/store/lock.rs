//! Exclusive lock around store mutations.
//!
//! A `capture` run and an active `watch` may write the same store. Each
//! mutation holds a `<store>.lock` file, created with `create_new`, for the
//! whole read-modify-write so neither side overwrites the other's insert.
//! A lock file older than [`STALE_AFTER`] is left over from a crashed
//! process and is taken over.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use super::{StoreError, StoreResult};

/// How long to wait for another process to release the lock.
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Age after which a lock file is considered abandoned.
pub const STALE_AFTER: Duration = Duration::from_secs(30);

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Held lock; the lock file is removed on drop.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    pub fn acquire(store_path: &Path) -> StoreResult<Self> {
        Self::acquire_with(store_path, LOCK_TIMEOUT, STALE_AFTER)
    }

    pub fn acquire_with(
        store_path: &Path,
        timeout: Duration,
        stale_after: Duration,
    ) -> StoreResult<Self> {
        let path = lock_path(store_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        let deadline = Instant::now() + timeout;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    let _ = writeln!(file, "{}", std::process::id());
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if is_stale(&path, stale_after) {
                        tracing::warn!(path = %path.display(), "removing abandoned store lock");
                        let _ = fs::remove_file(&path);
                        continue;
                    }
                    if Instant::now() >= deadline {
                        return Err(StoreError::Locked { path });
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
                Err(source) => return Err(StoreError::Write { path, source }),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release store lock");
        }
    }
}

fn lock_path(store_path: &Path) -> PathBuf {
    let mut name = OsString::from(store_path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

fn is_stale(path: &Path, stale_after: Duration) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .map(|age| age >= stale_after)
        .unwrap_or(false)
}
