//! # Voter Registry
//!
//! Tracks which voter identifiers have already voted.
//!
//! The registry itself is plain data; atomicity of `try_claim` against
//! concurrent callers comes from the `BallotLedger` lock that owns it.

use std::collections::HashSet;

/// Set of voter identifiers that have successfully voted.
#[derive(Debug, Default)]
pub struct VoterRegistry {
    claimed: HashSet<String>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `voter_id` if absent. Returns `false` and leaves state
    /// unchanged when it was already claimed.
    pub fn try_claim(&mut self, voter_id: &str) -> bool {
        if self.claimed.contains(voter_id) {
            return false;
        }
        self.claimed.insert(voter_id.to_owned())
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.claimed.contains(voter_id)
    }

    /// Number of claimed voters.
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    /// Undo a claim. Only the compensation path may call this.
    pub(crate) fn release(&mut self, voter_id: &str) -> bool {
        self.claimed.remove(voter_id)
    }
}
