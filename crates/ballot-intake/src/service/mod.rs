//! # Vote Intake Service
//!
//! Application services implementing the inbound ports.
//!
//! ## Architecture
//!
//! - `ElectionState` owns the ledger and the audit log for the whole process
//!   lifetime. It is built once at startup and shared by `Arc`.
//! - `VoteIntake` implements `VoteIntakeApi` (validate, claim, persist).
//! - `ResultsReader` implements `ResultsApi` (read only).
//! - `recovery` replays an existing audit log into a fresh ledger.

mod intake;
mod recovery;
mod results;

pub use intake::VoteIntake;
pub use recovery::RecoveryReport;
pub use results::ResultsReader;

use crate::domain::ledger::BallotLedger;
use crate::ports::outbound::AuditLog;

/// Process-wide election state.
///
/// The registry, the tally and the audit log live here and nowhere else.
pub struct ElectionState<A: AuditLog> {
    pub(crate) ledger: BallotLedger,
    pub(crate) audit_log: A,
}

impl<A: AuditLog> ElectionState<A> {
    /// Empty state over the given audit log.
    pub fn new(audit_log: A) -> Self {
        Self {
            ledger: BallotLedger::new(),
            audit_log,
        }
    }

    pub fn ledger(&self) -> &BallotLedger {
        &self.ledger
    }

    pub fn audit_log(&self) -> &A {
        &self.audit_log
    }
}
