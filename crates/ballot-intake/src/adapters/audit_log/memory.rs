use crate::domain::entities::VoteRecord;
use crate::domain::errors::AuditLogError;
use crate::ports::outbound::AuditLog;
use parking_lot::Mutex;

/// In-memory audit log for unit tests and ephemeral runs.
///
/// Appends are serialized by a mutex; order of the vector is acceptance order.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    records: Mutex<Vec<VoteRecord>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the log, e.g. to exercise recovery.
    pub fn with_records(records: Vec<VoteRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, record: &VoteRecord) -> Result<(), AuditLogError> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<VoteRecord>, AuditLogError> {
        Ok(self.records.lock().clone())
    }
}
