//! # Submission Validation
//!
//! Turns an untrusted `BallotSubmission` into a `ValidBallot`.
//!
//! ## Rules
//!
//! - voterId, partyName, partyValue must be present and non-blank
//! - each of those must fit within `IntakeConfig::max_field_len` bytes
//! - timestamp and source address are opaque audit fields, never rejected

use super::config::IntakeConfig;
use super::entities::{BallotSubmission, ValidBallot};
use super::errors::IntakeError;

fn require(
    value: Option<String>,
    field: &'static str,
    config: &IntakeConfig,
) -> Result<String, IntakeError> {
    let value = value.ok_or(IntakeError::InvalidInput {
        field,
        reason: "is required",
    })?;

    if value.trim().is_empty() {
        return Err(IntakeError::InvalidInput {
            field,
            reason: "must not be empty",
        });
    }

    if value.len() > config.max_field_len {
        return Err(IntakeError::InvalidInput {
            field,
            reason: "is too long",
        });
    }

    Ok(value)
}

/// Validate a submission. No state is touched here.
pub fn validate_submission(
    submission: BallotSubmission,
    config: &IntakeConfig,
) -> Result<ValidBallot, IntakeError> {
    let voter_id = require(submission.voter_id, "voterId", config)?;
    let party_name = require(submission.party_name, "partyName", config)?;
    let party_value = require(submission.party_value, "partyValue", config)?;

    Ok(ValidBallot {
        voter_id,
        party_name,
        party_value,
        claimed_timestamp: submission.claimed_timestamp,
        source_address: submission.source_address,
    })
}
