//! # API Handler Types
//!
//! Payloads exchanged with the transport boundary.

use crate::domain::tally::TallySnapshot;
use serde::{Deserialize, Serialize};

/// Inbound vote submission. Every field may be absent; validation decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteRequest {
    #[serde(default)]
    pub voter_id: Option<String>,
    #[serde(default)]
    pub party_name: Option<String>,
    #[serde(default)]
    pub party_value: Option<String>,
    /// Client-side timestamp, recorded verbatim.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Result of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voter_id: Option<String>,
    /// Display name of the party voted for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_voted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_number: Option<String>,
    /// Diagnostic detail on persistence or internal failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Known query discriminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryAction {
    GetResults,
    CheckVoted,
}

impl QueryAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "getResults" => Some(QueryAction::GetResults),
            "checkVoted" => Some(QueryAction::CheckVoted),
            _ => None,
        }
    }
}

/// Inbound read request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub voter_id: Option<String>,
}

impl QueryRequest {
    pub fn get_results() -> Self {
        Self {
            action: Some("getResults".into()),
            voter_id: None,
        }
    }

    pub fn check_voted(voter_id: impl Into<String>) -> Self {
        Self {
            action: Some("checkVoted".into()),
            voter_id: Some(voter_id.into()),
        }
    }
}

/// Result of a query. Only the fields relevant to the action are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_votes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<TallySnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_voted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QueryResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}
