//! Startup replay of the audit log into the ledger.

use super::ElectionState;
use crate::domain::errors::AuditLogError;
use crate::ports::outbound::AuditLog;

/// Outcome of `ElectionState::recover`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    /// Records that produced a claim.
    pub replayed: u64,
    /// Records whose voter was already claimed.
    pub skipped: u64,
}

impl<A: AuditLog> ElectionState<A> {
    /// Rebuild registry and tally from every record in the audit log.
    ///
    /// Must run before the state is shared with intake. Replay never appends.
    pub fn recover(&self) -> Result<RecoveryReport, AuditLogError> {
        let records = self.audit_log.read_all()?;
        let mut report = RecoveryReport::default();

        for record in &records {
            if self.ledger.claim(&record.voter_id, &record.party_value) {
                report.replayed += 1;
            } else {
                report.skipped += 1;
                tracing::warn!(
                    voter_id = %record.voter_id,
                    token = %record.confirmation_token,
                    "duplicate voter in audit log, skipping"
                );
            }
        }

        tracing::info!(
            replayed = report.replayed,
            skipped = report.skipped,
            "audit log replayed"
        );

        Ok(report)
    }
}
