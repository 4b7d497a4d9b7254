//! Write path: `VoteIntakeApi` implementation.

use super::ElectionState;
use crate::domain::config::IntakeConfig;
use crate::domain::entities::{BallotSubmission, VoteReceipt, VoteRecord};
use crate::domain::errors::IntakeError;
use crate::domain::ledger::BallotLedger;
use crate::domain::token::TokenGenerator;
use crate::domain::validation::validate_submission;
use crate::ports::inbound::VoteIntakeApi;
use crate::ports::outbound::{AuditLog, SystemTimeSource, TimeSource};
use std::sync::Arc;

/// The vote intake orchestrator.
///
/// Steps per call: validate, claim (registry + tally in one critical
/// section), mint token, append to the audit log. The ledger lock is
/// released before the append; a failed append reverts the claim.
pub struct VoteIntake<A: AuditLog, TS: TimeSource = SystemTimeSource> {
    state: Arc<ElectionState<A>>,
    tokens: TokenGenerator,
    time_source: TS,
    config: IntakeConfig,
}

impl<A: AuditLog> VoteIntake<A> {
    pub fn new(state: Arc<ElectionState<A>>, config: IntakeConfig) -> Self {
        Self::with_time_source(state, config, SystemTimeSource)
    }
}

impl<A: AuditLog, TS: TimeSource> VoteIntake<A, TS> {
    pub fn with_time_source(state: Arc<ElectionState<A>>, config: IntakeConfig, time_source: TS) -> Self {
        Self {
            state,
            tokens: TokenGenerator::new(),
            time_source,
            config,
        }
    }

    pub fn state(&self) -> &Arc<ElectionState<A>> {
        &self.state
    }

    /// Tokens minted by this intake, including ones later rolled back.
    pub fn tokens_issued(&self) -> u64 {
        self.tokens.issued()
    }
}

/// Reverts a claim on drop unless committed.
///
/// Covers both a failed append and an unwind out of `submit`.
struct PendingClaim<'a> {
    ledger: &'a BallotLedger,
    voter_id: &'a str,
    party_value: &'a str,
    committed: bool,
}

impl PendingClaim<'_> {
    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PendingClaim<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.ledger.revert(self.voter_id, self.party_value);
            tracing::warn!(voter_id = %self.voter_id, party = %self.party_value, "vote claim rolled back");
        }
    }
}

impl<A: AuditLog, TS: TimeSource> VoteIntakeApi for VoteIntake<A, TS> {
    fn submit(&self, submission: BallotSubmission) -> Result<VoteReceipt, IntakeError> {
        let ballot = validate_submission(submission, &self.config).map_err(|e| {
            tracing::debug!(error = %e, "submission rejected");
            e
        })?;

        if !self.state.ledger.claim(&ballot.voter_id, &ballot.party_value) {
            tracing::debug!(voter_id = %ballot.voter_id, "duplicate vote rejected");
            return Err(IntakeError::DuplicateVote {
                voter_id: ballot.voter_id,
            });
        }

        let token = self
            .tokens
            .next(&ballot.voter_id, self.time_source.now_millis());
        let record = VoteRecord::seal(ballot, token);

        let pending = PendingClaim {
            ledger: &self.state.ledger,
            voter_id: &record.voter_id,
            party_value: &record.party_value,
            committed: false,
        };

        if let Err(e) = self.state.audit_log.append(&record) {
            tracing::error!(
                voter_id = %record.voter_id,
                token = %record.confirmation_token,
                error = %e,
                "audit append failed"
            );
            drop(pending);
            return Err(e.into());
        }
        pending.commit();

        tracing::info!(
            voter_id = %record.voter_id,
            party = %record.party_value,
            token = %record.confirmation_token,
            "vote accepted"
        );

        Ok(VoteReceipt::from(&record))
    }
}
