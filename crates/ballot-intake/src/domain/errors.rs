//! # Domain Errors
//!
//! Error types for the Vote Intake subsystem.
//!
//! ## Design Principles
//!
//! - `IntakeError` is what a caller sees; every variant maps to one rejection kind
//! - `AuditLogError` stays inside the persistence boundary and is folded into
//!   `IntakeError::PersistenceFailure` by the service
//! - No panics in domain logic (use Result instead)

use std::path::PathBuf;
use thiserror::Error;

/// Rejection reasons for a submission or query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// A required field is missing, empty, or out of bounds.
    #[error("Invalid input: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    /// The voter identifier has already been claimed.
    #[error("Duplicate vote: voter {voter_id} has already voted")]
    DuplicateVote { voter_id: String },

    /// The audit write failed after a successful claim; the claim was rolled back.
    #[error("Persistence failure: {reason}")]
    PersistenceFailure { reason: String },

    /// Malformed query (unknown action, missing parameter).
    #[error("Query error: {reason}")]
    QueryError { reason: String },

    /// Unexpected failure caught at the submission boundary.
    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl IntakeError {
    /// Stable machine-readable kind, used in logs and gateway payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            IntakeError::InvalidInput { .. } => "InvalidInput",
            IntakeError::DuplicateVote { .. } => "DuplicateVote",
            IntakeError::PersistenceFailure { .. } => "PersistenceFailure",
            IntakeError::QueryError { .. } => "QueryError",
            IntakeError::Internal { .. } => "Internal",
        }
    }
}

/// Errors raised by an `AuditLog` backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditLogError {
    /// Underlying storage I/O failed.
    #[error("Audit log I/O error: {message}")]
    Io { message: String },

    /// A record could not be encoded or decoded.
    #[error("Audit record serialization error: {message}")]
    Serialization { message: String },

    /// A stored line is not a valid record.
    #[error("Audit log corrupted at {}:{line}", .path.display())]
    Corrupted { path: PathBuf, line: usize },

    /// Storage is unavailable (outage, injected failure).
    #[error("Audit log unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<std::io::Error> for AuditLogError {
    fn from(e: std::io::Error) -> Self {
        AuditLogError::Io {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for AuditLogError {
    fn from(e: serde_json::Error) -> Self {
        AuditLogError::Serialization {
            message: e.to_string(),
        }
    }
}

impl From<AuditLogError> for IntakeError {
    fn from(e: AuditLogError) -> Self {
        IntakeError::PersistenceFailure {
            reason: e.to_string(),
        }
    }
}
