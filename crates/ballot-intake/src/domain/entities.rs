//! # Domain Entities
//!
//! Core entities for the Vote Intake subsystem.
//!
//! ## Entities
//!
//! - `BallotSubmission`: Raw, untrusted input handed over by the transport boundary
//! - `VoteRecord`: Immutable audit record of one accepted vote
//! - `VoteReceipt`: What an accepted voter gets back

use serde::{Deserialize, Serialize};

/// An inbound submission as received from the transport layer.
///
/// Nothing in here is trusted. `claimed_timestamp` in particular is an opaque
/// audit field and never orders or deduplicates anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BallotSubmission {
    pub voter_id: Option<String>,
    pub party_name: Option<String>,
    pub party_value: Option<String>,
    pub claimed_timestamp: Option<String>,
    /// Network origin, supplied by the transport layer.
    pub source_address: String,
}

impl BallotSubmission {
    /// Build a submission with every field present.
    pub fn new(
        voter_id: impl Into<String>,
        party_name: impl Into<String>,
        party_value: impl Into<String>,
        claimed_timestamp: impl Into<String>,
        source_address: impl Into<String>,
    ) -> Self {
        Self {
            voter_id: Some(voter_id.into()),
            party_name: Some(party_name.into()),
            party_value: Some(party_value.into()),
            claimed_timestamp: Some(claimed_timestamp.into()),
            source_address: source_address.into(),
        }
    }
}

/// A submission whose required fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBallot {
    pub voter_id: String,
    pub party_name: String,
    pub party_value: String,
    pub claimed_timestamp: Option<String>,
    pub source_address: String,
}

/// Durable record of one accepted vote.
///
/// Created exactly once per accepted vote and never mutated. Field names are
/// camelCase on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub voter_id: String,
    pub party_name: String,
    pub party_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_timestamp: Option<String>,
    pub source_address: String,
    pub confirmation_token: String,
}

impl VoteRecord {
    /// Seal a validated ballot with its confirmation token.
    pub fn seal(ballot: ValidBallot, confirmation_token: String) -> Self {
        Self {
            voter_id: ballot.voter_id,
            party_name: ballot.party_name,
            party_value: ballot.party_value,
            claimed_timestamp: ballot.claimed_timestamp,
            source_address: ballot.source_address,
            confirmation_token,
        }
    }
}

/// Proof of acceptance returned to the voter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    pub confirmation_token: String,
    pub party_name: String,
    pub voter_id: String,
}

impl From<&VoteRecord> for VoteReceipt {
    fn from(record: &VoteRecord) -> Self {
        Self {
            confirmation_token: record.confirmation_token.clone(),
            party_name: record.party_name.clone(),
            voter_id: record.voter_id.clone(),
        }
    }
}
