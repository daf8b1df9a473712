//! core::lock
//!
//! Exclusive lock for mutating commands.
//!
//! # Architecture
//!
//! Every mutation rewrites the whole store file, which is not safe when two
//! writers interleave. The lock makes one process at a time the writer for
//! a working directory.
//!
//! # Storage
//!
//! - `<work_dir>/.branchwork/lock` - Lock file with OS-level exclusive lock
//!
//! # Invariants
//!
//! - Lock must be held across load, mutate and save
//! - Lock is automatically released on drop (RAII pattern)
//! - Lock acquisition is non-blocking (fails fast if locked)
//!
//! # Example
//!
//! ```no_run
//! use branchwork::core::lock::RepoLock;
//! use branchwork::core::paths::RepoPaths;
//!
//! let paths = RepoPaths::new(".");
//! let lock = RepoLock::acquire(&paths)?;
//!
//! // Perform operations while holding lock
//!
//! drop(lock);
//! # Ok::<(), branchwork::core::lock::LockError>(())
//! ```

use std::fs::{self, File, OpenOptions};

use fs2::FileExt;
use thiserror::Error;
use tracing::debug;

use crate::core::paths::RepoPaths;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("branch tree is locked by another branchwork process")]
    AlreadyLocked,

    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),
}

/// An exclusive lock on a working directory's branch tree.
///
/// The lock is released when this guard is dropped.
#[derive(Debug)]
pub struct RepoLock {
    file: File,
}

impl RepoLock {
    /// Attempt to acquire the lock.
    ///
    /// Uses OS-level file locking via `fs2`, which works across processes.
    /// Non-blocking: if another process holds the lock, this returns
    /// `LockError::AlreadyLocked` immediately.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(paths: &RepoPaths) -> Result<Self, LockError> {
        let data_dir = paths.data_dir();
        fs::create_dir_all(&data_dir).map_err(|e| {
            LockError::CreateFailed(format!("cannot create {}: {}", data_dir.display(), e))
        })?;

        let path = paths.lock_path();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!(path = %path.display(), "acquired lock");
                Ok(Self { file })
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(LockError::AlreadyLocked),
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }
}

impl Drop for RepoLock {
    fn drop(&mut self) {
        // Best-effort; closing the file also releases it
        let _ = FileExt::unlock(&self.file);
    }
}
