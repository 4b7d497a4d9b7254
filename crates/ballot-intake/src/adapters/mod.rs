//! # Adapters Module
//!
//! Adapter implementations for the Vote Intake subsystem.
//!
//! ## Modules
//!
//! - `audit_log`: `AuditLog` backends (file, in-memory, fault injection)
//! - `api_handler`: transport-facing request/response mapping
//! - `lock`: audit directory process lock (single writer guard)

pub mod api_handler;
pub mod audit_log;
#[cfg(feature = "locking")]
pub mod lock;

pub use api_handler::{ApiGatewayHandler, QueryRequest, QueryResponse, SubmitVoteRequest, SubmitVoteResponse};
pub use audit_log::{FaultyAuditLog, FileAuditLog, InMemoryAuditLog};
#[cfg(feature = "locking")]
pub use lock::{AuditDirLock, LockError};
