//! # File Lock Implementation
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from audit directory locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created.
    #[error("Failed to create lock file: {0}")]
    CreateFailed(#[source] io::Error),

    /// Another process already owns the audit directory.
    #[error(
        "Audit directory already in use{} ({})",
        .pid.map(|p| format!(" by process {p}")).unwrap_or_default(),
        .path.display()
    )]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },

    /// Failed to write PID to lock file.
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Exclusive lock on an audit directory.
///
/// Held for the lifetime of the authoritative writer, released on drop.
///
/// # Example
///
/// ```ignore
/// let lock = AuditDirLock::acquire(Path::new("vote_logs"))?;
/// // Lock is held until `lock` goes out of scope
/// ```
#[derive(Debug)]
pub struct AuditDirLock {
    /// Kept open to keep the lock.
    file: File,
    path: PathBuf,
    pid: u32,
}

impl AuditDirLock {
    /// Lock file name
    pub const LOCK_FILE: &'static str = "LOCK";

    /// Take the lock without waiting. Creates `dir` if it does not exist.
    ///
    /// # Errors
    ///
    /// `LockError::AlreadyLocked` if another handle holds the lock.
    pub fn acquire(dir: &Path) -> Result<Self, LockError> {
        std::fs::create_dir_all(dir).map_err(LockError::CreateFailed)?;
        let path = dir.join(Self::LOCK_FILE);

        // No truncation before the lock is ours: the holder's PID must survive.
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(LockError::CreateFailed)?;

        if FileExt::try_lock_exclusive(&file).is_err() {
            let pid = Self::read_existing_pid(&path);
            tracing::warn!(path = %path.display(), holder = ?pid, "audit directory is locked");
            return Err(LockError::AlreadyLocked { pid, path });
        }

        let pid = std::process::id();
        file.set_len(0).map_err(LockError::WriteFailed)?;
        file.seek(SeekFrom::Start(0)).map_err(LockError::WriteFailed)?;
        writeln!(file, "{pid}").map_err(LockError::WriteFailed)?;
        file.sync_all().map_err(LockError::WriteFailed)?;

        tracing::debug!(path = %path.display(), pid, "audit directory locked");

        Ok(Self { file, path, pid })
    }

    /// PID recorded in the lock file.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for AuditDirLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}
