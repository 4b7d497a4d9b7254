//! # Confirmation Tokens
//!
//! Format: `VOTE-<voterId>-<millis>-<sequence>`.
//!
//! The sequence number comes from a process-wide atomic counter, so two
//! tokens minted in the same millisecond still differ. The millisecond part
//! only makes tokens from different process lifetimes unlikely to collide.

use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed token prefix.
pub const TOKEN_PREFIX: &str = "VOTE";

/// Mints confirmation tokens unique within one process lifetime.
#[derive(Debug, Default)]
pub struct TokenGenerator {
    sequence: AtomicU64,
}

impl TokenGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a token for `voter_id` at `now_millis`.
    pub fn next(&self, voter_id: &str, now_millis: u64) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{TOKEN_PREFIX}-{voter_id}-{now_millis}-{seq:06}")
    }

    /// Number of tokens minted so far.
    pub fn issued(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}
