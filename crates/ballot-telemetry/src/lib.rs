//! # Ballot Telemetry
//!
//! Logging setup shared by the ballot binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ballot_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ballot_telemetry::log_event!(info, "node", "ready", dir = %"vote_logs");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BALLOT_LOG_LEVEL` | `RUST_LOG`, then `info` | Log filter directive |
//! | `BALLOT_JSON_LOGS` | `false` | Emit JSON lines instead of text |
//! | `BALLOT_SERVICE_NAME` | `ballot-node` | Service name stamped on startup |
//!
//! Logs go to stderr. Stdout belongs to the request/response stream.

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

#[doc(hidden)]
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),
}
