//! # Audit Directory Locking
//!
//! Keeps a second process from appending to the same audit directory.
//!
//! ## Modules
//!
//! - `flock`: `AuditDirLock` implementation using fs2

mod flock;

pub use flock::{AuditDirLock, LockError};
