//! # Inbound Ports (Driving Ports)
//!
//! The two operations the transport boundary may invoke: submitting a vote
//! and reading results.

use crate::domain::entities::{BallotSubmission, VoteReceipt};
use crate::domain::errors::IntakeError;
use crate::domain::ledger::LedgerSnapshot;
use crate::domain::tally::TallySnapshot;

/// Write side: one call per inbound submission.
///
/// Implementations must be safe to call from any number of threads at once,
/// for the same or different voters.
pub trait VoteIntakeApi: Send + Sync {
    /// Validate, claim, count, persist and return a receipt.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: a required field is missing or empty (no state change)
    /// - `DuplicateVote`: the voter already voted (no state change)
    /// - `PersistenceFailure`: the audit write failed; the claim and count were rolled back
    fn submit(&self, submission: BallotSubmission) -> Result<VoteReceipt, IntakeError>;
}

/// Read side. Never mutates.
pub trait ResultsApi: Send + Sync {
    /// Number of distinct voters that have voted.
    fn total_votes(&self) -> u64;

    /// Per-party counts, copied at one instant.
    fn breakdown(&self) -> TallySnapshot;

    fn has_voted(&self, voter_id: &str) -> bool;

    /// Total and breakdown read together, so the counts always sum to the total.
    fn results(&self) -> LedgerSnapshot;
}
