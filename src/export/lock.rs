//! export::lock
//!
//! Exclusive lock on the output directory.
//!
//! # Design
//!
//! Two concurrent export runs writing into the same `Output/` directory
//! would interleave artifacts from different traversals. The lock is an
//! OS-level exclusive file lock, acquired non-blocking before the first
//! artifact is written and released on drop (RAII pattern).

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Lock file name inside the output directory.
const LOCK_FILE_NAME: &str = ".modelex.lock";

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("output directory is locked by another modelex process")]
    AlreadyLocked,

    /// I/O error during lock operations.
    #[error("lock i/o error: {0}")]
    IoError(#[from] std::io::Error),
}

/// An exclusive lock on the output directory.
///
/// The lock is automatically released when this guard is dropped, even if
/// the export aborts mid-run.
#[derive(Debug)]
pub struct OutputLock {
    file: File,
    path: PathBuf,
}

impl OutputLock {
    /// Acquire the lock inside `dir`, failing fast if another process holds it.
    pub fn acquire(dir: &Path) -> Result<Self, LockError> {
        let path = dir.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        file.try_lock_exclusive().map_err(|err| {
            if err.kind() == fs2::lock_contended_error().kind() {
                LockError::AlreadyLocked
            } else {
                LockError::IoError(err)
            }
        })?;
        Ok(Self { file, path })
    }

    /// The lock file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OutputLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
