//! # Ballot Node
//!
//! Wires the intake service to a line-oriented transport.
//!
//! ## Protocol
//!
//! One JSON object per line on input, one per line on output. The `op`
//! field selects the operation; an optional `id` is echoed back.
//!
//! ```text
//! {"id":1,"op":"submit","voterId":"V1","partyName":"Alpha","partyValue":"A","timestamp":"...","source":"10.0.0.7"}
//! {"id":2,"op":"query","action":"getResults"}
//! {"id":3,"op":"query","action":"checkVoted","voterId":"V1"}
//! ```
//!
//! Requests run concurrently; responses are written as they complete, so
//! clients should match them by `id`.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (env)
//! 2. Initialize logging
//! 3. Lock the audit directory
//! 4. Open the audit log and replay it into the ledger
//! 5. Serve until EOF or Ctrl+C, drain in-flight requests, then log a summary

pub mod config;
pub mod runtime;

pub use config::NodeConfig;
pub use runtime::{NodeRuntime, DEFAULT_SOURCE_ADDRESS};
