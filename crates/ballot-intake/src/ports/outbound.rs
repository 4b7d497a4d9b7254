//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Vote Intake service.
//!
//! Production: `FileAuditLog` (adapters/audit_log/file.rs)
//! Testing: `InMemoryAuditLog`, `FaultyAuditLog`

use crate::domain::entities::VoteRecord;
use crate::domain::errors::AuditLogError;
use std::sync::Arc;

/// Append-only, durable record of accepted votes.
///
/// ## Atomicity Guarantee
///
/// Each `append` is all or nothing: either the whole record is stored, or
/// `Err` is returned and nothing is visible to `read_all`. Concurrent
/// appends may interleave in any order but are never torn or dropped.
pub trait AuditLog: Send + Sync {
    /// Durably record one accepted vote.
    fn append(&self, record: &VoteRecord) -> Result<(), AuditLogError>;

    /// Every stored record in acceptance order. Audit/debug use only.
    fn read_all(&self) -> Result<Vec<VoteRecord>, AuditLogError>;
}

impl<T: AuditLog + ?Sized> AuditLog for Arc<T> {
    fn append(&self, record: &VoteRecord) -> Result<(), AuditLogError> {
        (**self).append(record)
    }

    fn read_all(&self) -> Result<Vec<VoteRecord>, AuditLogError> {
        (**self).read_all()
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Fixed clock for tests and replay.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedTimeSource(pub u64);

impl TimeSource for FixedTimeSource {
    fn now_millis(&self) -> u64 {
        self.0
    }
}
