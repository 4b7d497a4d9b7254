//! Node configuration.

use ballot_intake::{AuditLogConfig, IntakeConfig, Rotation};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Everything the node needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub intake: IntakeConfig,
    pub audit: AuditLogConfig,
    /// Replay the audit log into the ledger before serving.
    pub recover_on_start: bool,
    /// Requests processed at once; input is not read past this.
    pub max_in_flight: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            intake: IntakeConfig::default(),
            audit: AuditLogConfig::default(),
            recover_on_start: true,
            max_in_flight: 64,
        }
    }
}

impl NodeConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BALLOT_AUDIT_DIR`: audit directory (default: vote_logs)
    /// - `BALLOT_AUDIT_ROTATION`: `daily` or `never` (default: daily)
    /// - `BALLOT_AUDIT_FSYNC`: fsync every append (default: true)
    /// - `BALLOT_MAX_FIELD_LEN`: longest accepted field in bytes (default: 256)
    /// - `BALLOT_RECOVER`: replay the audit log on start (default: true)
    /// - `BALLOT_MAX_IN_FLIGHT`: concurrent requests (default: 64)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` over an arbitrary variable source.
    ///
    /// Values that fail to parse are logged and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("BALLOT_AUDIT_DIR").filter(|d| !d.trim().is_empty()) {
            config.audit.dir = PathBuf::from(dir);
        }
        if let Some(rotation) = parsed::<Rotation>(&lookup, "BALLOT_AUDIT_ROTATION") {
            config.audit.rotation = rotation;
        }
        if let Some(fsync) = flag(&lookup, "BALLOT_AUDIT_FSYNC") {
            config.audit.sync_on_append = fsync;
        }
        if let Some(len) = parsed::<usize>(&lookup, "BALLOT_MAX_FIELD_LEN") {
            if len == 0 {
                warn!("BALLOT_MAX_FIELD_LEN must be positive, keeping default");
            } else {
                config.intake.max_field_len = len;
            }
        }
        if let Some(recover) = flag(&lookup, "BALLOT_RECOVER") {
            config.recover_on_start = recover;
        }
        if let Some(limit) = parsed::<usize>(&lookup, "BALLOT_MAX_IN_FLIGHT") {
            if limit == 0 {
                warn!("BALLOT_MAX_IN_FLIGHT must be positive, keeping default");
            } else {
                config.max_in_flight = limit;
            }
        }

        config
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring invalid setting");
            None
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let raw = lookup(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(key, value = %raw, "ignoring invalid flag");
            None
        }
    }
}
