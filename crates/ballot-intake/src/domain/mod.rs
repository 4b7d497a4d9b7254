//! # Domain Layer
//!
//! Pure domain logic for the Vote Intake subsystem.
//!
//! ## Modules
//!
//! - `entities`: BallotSubmission, VoteRecord, VoteReceipt
//! - `registry`: VoterRegistry (who has voted)
//! - `tally`: Tally (per-party counters)
//! - `ledger`: BallotLedger (registry + tally behind one lock)
//! - `token`: Confirmation token generation
//! - `validation`: Input validation rules
//! - `config`: Configuration value objects
//! - `errors`: Domain error types

pub mod config;
pub mod entities;
pub mod errors;
pub mod ledger;
pub mod registry;
pub mod tally;
pub mod token;
pub mod validation;

pub use config::{AuditLogConfig, IntakeConfig, Rotation};
pub use entities::{BallotSubmission, ValidBallot, VoteReceipt, VoteRecord};
pub use errors::{AuditLogError, IntakeError};
pub use ledger::{BallotLedger, LedgerSnapshot};
pub use registry::VoterRegistry;
pub use tally::{Tally, TallySnapshot};
pub use token::TokenGenerator;
