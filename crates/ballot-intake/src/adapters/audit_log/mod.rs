//! Audit Log Adapters
//!
//! Implementations of the `AuditLog` trait.

mod faulty;
mod file;
mod memory;

pub use faulty::FaultyAuditLog;
pub use file::FileAuditLog;
pub use memory::InMemoryAuditLog;
