//! # API Gateway Handler
//!
//! Core handler struct and methods for the transport boundary.

use super::types::{QueryAction, QueryRequest, QueryResponse, SubmitVoteRequest, SubmitVoteResponse};
use crate::domain::entities::BallotSubmission;
use crate::domain::errors::IntakeError;
use crate::ports::inbound::{ResultsApi, VoteIntakeApi};
use std::panic::{self, AssertUnwindSafe};
use uuid::Uuid;

/// User-facing response messages.
pub mod messages {
    pub const ACCEPTED: &str = "Your vote has been successfully recorded!";
    pub const INVALID_INPUT: &str = "Invalid vote data. All fields are required.";
    pub const DUPLICATE: &str = "You have already voted. Multiple votes are not allowed.";
    pub const PROCESSING_ERROR: &str = "An error occurred while processing your vote.";
    pub const INVALID_ACTION: &str = "Invalid action";
    pub const VOTER_ID_REQUIRED: &str = "voterId is required";
}

/// Gateway over the intake and results services.
///
/// Every call returns a structured response. Errors and panics from the
/// services never cross this boundary.
pub struct ApiGatewayHandler<I: VoteIntakeApi, R: ResultsApi> {
    intake: I,
    results: R,
}

impl<I: VoteIntakeApi, R: ResultsApi> ApiGatewayHandler<I, R> {
    pub fn new(intake: I, results: R) -> Self {
        Self { intake, results }
    }

    /// Handle a vote submission from `source_address`.
    pub fn handle_submit(&self, request: SubmitVoteRequest, source_address: &str) -> SubmitVoteResponse {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("submit", %request_id, source = %source_address);
        let _entered = span.enter();

        let submission = BallotSubmission {
            voter_id: request.voter_id,
            party_name: request.party_name,
            party_value: request.party_value,
            claimed_timestamp: request.timestamp,
            source_address: source_address.to_string(),
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.intake.submit(submission)));

        match outcome {
            Ok(Ok(receipt)) => SubmitVoteResponse {
                success: true,
                message: messages::ACCEPTED.to_string(),
                voter_id: Some(receipt.voter_id),
                party_voted: Some(receipt.party_name),
                confirmation_number: Some(receipt.confirmation_token),
                error: None,
            },
            Ok(Err(e)) => submit_failure(&e),
            Err(payload) => {
                let error = IntakeError::Internal {
                    reason: panic_message(payload.as_ref()),
                };
                tracing::error!(%error, "submission panicked");
                submit_failure(&error)
            }
        }
    }

    /// Handle a read request.
    pub fn handle_query(&self, request: &QueryRequest) -> QueryResponse {
        match self.run_query(request) {
            Ok(response) => response,
            Err(IntakeError::QueryError { reason }) => {
                tracing::debug!(action = ?request.action, %reason, "query rejected");
                QueryResponse::failure(reason)
            }
            Err(e) => QueryResponse::failure(e.to_string()),
        }
    }

    fn run_query(&self, request: &QueryRequest) -> Result<QueryResponse, IntakeError> {
        let action = request
            .action
            .as_deref()
            .and_then(QueryAction::parse)
            .ok_or_else(|| IntakeError::QueryError {
                reason: messages::INVALID_ACTION.to_string(),
            })?;

        match action {
            QueryAction::GetResults => {
                let snapshot = self.results.results();
                Ok(QueryResponse {
                    success: true,
                    total_votes: Some(snapshot.total_votes),
                    vote_count: Some(snapshot.breakdown),
                    ..QueryResponse::default()
                })
            }
            QueryAction::CheckVoted => {
                let voter_id = request
                    .voter_id
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| IntakeError::QueryError {
                        reason: messages::VOTER_ID_REQUIRED.to_string(),
                    })?;
                Ok(QueryResponse {
                    success: true,
                    has_voted: Some(self.results.has_voted(voter_id)),
                    ..QueryResponse::default()
                })
            }
        }
    }

    pub fn intake(&self) -> &I {
        &self.intake
    }

    pub fn results(&self) -> &R {
        &self.results
    }
}

fn submit_failure(error: &IntakeError) -> SubmitVoteResponse {
    let (message, detail) = match error {
        IntakeError::InvalidInput { .. } => (messages::INVALID_INPUT, None),
        IntakeError::DuplicateVote { .. } => (messages::DUPLICATE, None),
        IntakeError::PersistenceFailure { .. }
        | IntakeError::QueryError { .. }
        | IntakeError::Internal { .. } => (messages::PROCESSING_ERROR, Some(error.to_string())),
    };

    SubmitVoteResponse {
        success: false,
        message: message.to_string(),
        error: detail,
        ..SubmitVoteResponse::default()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
