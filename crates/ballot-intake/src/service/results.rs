//! Read path: `ResultsApi` implementation.

use super::ElectionState;
use crate::domain::ledger::LedgerSnapshot;
use crate::domain::tally::TallySnapshot;
use crate::ports::inbound::ResultsApi;
use crate::ports::outbound::AuditLog;
use std::sync::Arc;

/// Observational view over the election state.
pub struct ResultsReader<A: AuditLog> {
    state: Arc<ElectionState<A>>,
}

impl<A: AuditLog> ResultsReader<A> {
    pub fn new(state: Arc<ElectionState<A>>) -> Self {
        Self { state }
    }
}

impl<A: AuditLog> Clone for ResultsReader<A> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: AuditLog> ResultsApi for ResultsReader<A> {
    fn total_votes(&self) -> u64 {
        self.state.ledger.total_votes()
    }

    fn breakdown(&self) -> TallySnapshot {
        self.state.ledger.breakdown()
    }

    fn has_voted(&self, voter_id: &str) -> bool {
        self.state.ledger.has_voted(voter_id)
    }

    fn results(&self) -> LedgerSnapshot {
        self.state.ledger.snapshot()
    }
}
