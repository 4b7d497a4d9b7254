//! # Ballot Intake
//!
//! Vote intake and tallying for a single election. Accepts votes from many
//! concurrent callers, guarantees one vote per voter, keeps per-party counts,
//! and writes every accepted vote to an append-only audit log.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | One Vote Per Voter | A voter id is claimed at most once, even under races |
//! | 2 | Count Consistency | Tally per party equals accepted votes for that party |
//! | 3 | Durable Claims | No voter stays claimed without an audit record |
//! | 4 | Unique Tokens | Confirmation tokens never repeat within a process |
//! | 5 | Acceptance Order | Audit order is acceptance order, never client time |
//! | 6 | No I/O Under Ledger Lock | The audit write runs after the ledger lock is released |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Registry, tally, ledger, records, tokens, validation
//! - `ports/` - Inbound API (`VoteIntakeApi`, `ResultsApi`), outbound SPI (`AuditLog`, `TimeSource`)
//! - `adapters/` - Audit log backends, directory lock, gateway handler
//! - `service/` - `ElectionState`, `VoteIntake`, `ResultsReader`
//!
//! ## Usage
//!
//! ```ignore
//! use ballot_intake::{ElectionState, InMemoryAuditLog, IntakeConfig, VoteIntake, ResultsReader};
//!
//! let state = Arc::new(ElectionState::new(InMemoryAuditLog::new()));
//! let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());
//! let results = ResultsReader::new(state);
//!
//! let receipt = intake.submit(BallotSubmission::new("V1", "Alpha", "A", "", "127.0.0.1"))?;
//! assert_eq!(results.total_votes(), 1);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{
    ApiGatewayHandler, FaultyAuditLog, FileAuditLog, InMemoryAuditLog, QueryRequest, QueryResponse,
    SubmitVoteRequest, SubmitVoteResponse,
};
#[cfg(feature = "locking")]
pub use adapters::{AuditDirLock, LockError};
pub use domain::{
    AuditLogConfig, AuditLogError, BallotLedger, BallotSubmission, IntakeConfig, IntakeError,
    LedgerSnapshot, Rotation, TallySnapshot, TokenGenerator, VoteReceipt, VoteRecord,
};
pub use ports::inbound::{ResultsApi, VoteIntakeApi};
pub use ports::outbound::{AuditLog, FixedTimeSource, SystemTimeSource, TimeSource};
pub use service::{ElectionState, RecoveryReport, ResultsReader, VoteIntake};
