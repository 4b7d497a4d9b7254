//! # Ballot Ledger
//!
//! The synchronized state unit combining `VoterRegistry` and `Tally`.
//!
//! ## Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | 1 | Exactly-once claim | check-and-insert runs inside one write lock |
//! | 2 | Count consistency | claim and increment happen in the same critical section |
//! | 3 | Consistent reads | totals and breakdown are copied under one read lock |
//!
//! The lock is never held across I/O. Callers acquire, mutate, release and
//! only then talk to the audit log.

use super::registry::VoterRegistry;
use super::tally::{Tally, TallySnapshot};
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct LedgerState {
    registry: VoterRegistry,
    tally: Tally,
}

/// Consistent copy of the ledger at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub total_votes: u64,
    pub breakdown: TallySnapshot,
}

/// Registry and tally behind a single reader-writer lock.
#[derive(Debug, Default)]
pub struct BallotLedger {
    state: RwLock<LedgerState>,
}

impl BallotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim `voter_id` and count one vote for `party_value`.
    ///
    /// Returns `false` without touching the tally if the voter was already
    /// claimed.
    pub fn claim(&self, voter_id: &str, party_value: &str) -> bool {
        let mut state = self.state.write();
        if !state.registry.try_claim(voter_id) {
            return false;
        }
        state.tally.increment(party_value);
        true
    }

    /// Compensate a `claim` whose audit write failed.
    pub fn revert(&self, voter_id: &str, party_value: &str) {
        let mut state = self.state.write();
        if state.registry.release(voter_id) {
            state.tally.retract(party_value);
        }
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.state.read().registry.has_voted(voter_id)
    }

    /// Size of the claimed set.
    pub fn total_votes(&self) -> u64 {
        self.state.read().registry.len() as u64
    }

    /// Per-party counts, copied.
    pub fn breakdown(&self) -> TallySnapshot {
        self.state.read().tally.snapshot()
    }

    /// Totals and breakdown taken under the same read lock.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.state.read();
        LedgerSnapshot {
            total_votes: state.registry.len() as u64,
            breakdown: state.tally.snapshot(),
        }
    }
}
