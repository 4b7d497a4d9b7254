//! # Tally
//!
//! Per-party vote counters keyed by canonical party value.

use std::collections::{BTreeMap, HashMap};

/// Point-in-time copy of the counters, ordered by party value.
pub type TallySnapshot = BTreeMap<String, u64>;

/// Running vote count per party value.
///
/// Counts only go up through the public API. `retract` exists solely for
/// rolling back an increment whose audit write failed.
#[derive(Debug, Default)]
pub struct Tally {
    counts: HashMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one vote for `party_value`, creating the counter at 1.
    pub fn increment(&mut self, party_value: &str) {
        match self.counts.get_mut(party_value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(party_value.to_owned(), 1);
            }
        }
    }

    /// Current count for one party (0 if never voted for).
    pub fn count(&self, party_value: &str) -> u64 {
        self.counts.get(party_value).copied().unwrap_or(0)
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Owned copy for reporting; not a live view.
    pub fn snapshot(&self) -> TallySnapshot {
        self.counts
            .iter()
            .map(|(party, count)| (party.clone(), *count))
            .collect()
    }

    /// Undo one `increment`. A counter that drops to zero is removed so the
    /// snapshot never lists a party with no recorded votes.
    pub(crate) fn retract(&mut self, party_value: &str) {
        if let Some(count) = self.counts.get_mut(party_value) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.counts.remove(party_value);
            }
        }
    }
}
