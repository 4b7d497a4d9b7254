use crate::domain::entities::VoteRecord;
use crate::domain::errors::AuditLogError;
use crate::ports::outbound::AuditLog;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Controllable audit log wrapper for failure-path tests.
///
/// Delegates to `inner` unless told to fail. Failed appends never reach the
/// inner log, which mirrors the all-or-nothing contract.
#[derive(Debug, Default)]
pub struct FaultyAuditLog<L> {
    inner: L,
    always_fail: AtomicBool,
    fail_budget: AtomicU64,
    failures: AtomicU64,
}

impl<L: AuditLog> FaultyAuditLog<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            always_fail: AtomicBool::new(false),
            fail_budget: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Fail every append until switched back off.
    pub fn fail_appends(&self, fail: bool) {
        self.always_fail.store(fail, Ordering::SeqCst);
    }

    /// Fail exactly the next `count` appends.
    pub fn fail_next(&self, count: u64) {
        self.fail_budget.store(count, Ordering::SeqCst);
    }

    /// Number of appends rejected so far.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    fn should_fail(&self) -> bool {
        if self.always_fail.load(Ordering::SeqCst) {
            return true;
        }
        self.fail_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl<L: AuditLog> AuditLog for FaultyAuditLog<L> {
    fn append(&self, record: &VoteRecord) -> Result<(), AuditLogError> {
        if self.should_fail() {
            self.failures.fetch_add(1, Ordering::SeqCst);
            return Err(AuditLogError::Unavailable {
                reason: "injected storage failure".into(),
            });
        }
        self.inner.append(record)
    }

    fn read_all(&self) -> Result<Vec<VoteRecord>, AuditLogError> {
        self.inner.read_all()
    }
}
