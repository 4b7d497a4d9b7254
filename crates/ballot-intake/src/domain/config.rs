//! # Configuration Value Objects

use std::path::PathBuf;

/// Default upper bound on voter id / party field length, in bytes.
pub const DEFAULT_MAX_FIELD_LEN: usize = 256;

/// Intake service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Longest accepted voterId, partyName or partyValue.
    pub max_field_len: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

/// How audit segments are split across files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// One segment per UTC day: `votes_YYYY-MM-DD.jsonl`.
    #[default]
    Daily,
    /// A single `votes.jsonl`.
    Never,
}

impl std::str::FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Rotation::Daily),
            "never" | "none" => Ok(Rotation::Never),
            other => Err(format!("unknown rotation: {other}")),
        }
    }
}

/// File-backed audit log configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogConfig {
    /// Directory holding the audit segments (created on open).
    pub dir: PathBuf,
    pub rotation: Rotation,
    /// fsync each record before reporting the append as successful.
    pub sync_on_append: bool,
}

impl Default for AuditLogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("vote_logs"),
            rotation: Rotation::Daily,
            sync_on_append: true,
        }
    }
}

impl AuditLogConfig {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }
}
