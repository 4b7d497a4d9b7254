//! # Concurrency Properties
//!
//! Exercises the submit path from many threads at once:
//!
//! 1. **Same voter race**: exactly one of N simultaneous submissions wins
//! 2. **Distinct voters**: 10,000 parallel submissions all succeed with unique tokens
//! 3. **Tally consistency**: per-party counts match accepted submissions and the audit log
//! 4. **Consistent reads**: readers never see a breakdown that disagrees with the total

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    use rand::Rng;
    use rayon::prelude::*;

    use ballot_intake::{
        AuditLog, BallotSubmission, ElectionState, InMemoryAuditLog, IntakeConfig, IntakeError,
        ResultsApi, ResultsReader, VoteIntake, VoteIntakeApi,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const PARTIES: [&str; 4] = ["A", "B", "C", "D"];

    fn make_election() -> (Arc<VoteIntake<InMemoryAuditLog>>, ResultsReader<InMemoryAuditLog>) {
        let state = Arc::new(ElectionState::new(InMemoryAuditLog::new()));
        let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());
        (Arc::new(intake), ResultsReader::new(state))
    }

    fn ballot(voter: &str, party: &str) -> BallotSubmission {
        BallotSubmission::new(voter, format!("Party {party}"), party, "", "10.1.1.1")
    }

    // =============================================================================
    // SAME VOTER
    // =============================================================================

    #[test]
    fn test_same_voter_race_has_exactly_one_winner() {
        const CONTENDERS: usize = 16;

        for round in 0..20 {
            let (intake, results) = make_election();
            let barrier = Arc::new(Barrier::new(CONTENDERS));
            let voter = format!("race-{round}");

            let handles: Vec<_> = (0..CONTENDERS)
                .map(|i| {
                    let intake = Arc::clone(&intake);
                    let barrier = Arc::clone(&barrier);
                    let voter = voter.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        intake.submit(ballot(&voter, PARTIES[i % PARTIES.len()]))
                    })
                })
                .collect();

            let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

            let accepted = outcomes.iter().filter(|o| o.is_ok()).count();
            let duplicates = outcomes
                .iter()
                .filter(|o| matches!(o, Err(IntakeError::DuplicateVote { .. })))
                .count();

            assert_eq!(accepted, 1, "round {round}");
            assert_eq!(duplicates, CONTENDERS - 1, "round {round}");
            assert_eq!(results.total_votes(), 1);
            assert_eq!(results.breakdown().values().sum::<u64>(), 1);
            assert_eq!(intake.state().audit_log().len(), 1);
        }
    }

    // =============================================================================
    // DISTINCT VOTERS
    // =============================================================================

    #[test]
    fn test_ten_thousand_voters_get_unique_tokens() {
        const VOTERS: usize = 10_000;
        let (intake, results) = make_election();

        let tokens: Vec<String> = (0..VOTERS)
            .into_par_iter()
            .map(|i| {
                intake
                    .submit(ballot(&format!("voter-{i}"), PARTIES[i % PARTIES.len()]))
                    .map(|receipt| receipt.confirmation_token)
            })
            .collect::<Result<_, _>>()
            .unwrap();

        let unique: HashSet<_> = tokens.iter().collect();
        assert_eq!(unique.len(), VOTERS);
        assert!(tokens.iter().all(|t| t.starts_with("VOTE-voter-")));

        assert_eq!(results.total_votes(), VOTERS as u64);
        for party in PARTIES {
            assert_eq!(results.breakdown()[party], (VOTERS / PARTIES.len()) as u64);
        }
    }

    #[test]
    fn test_tally_matches_accepted_and_audit_log_under_mixed_load() {
        let (intake, results) = make_election();
        let mut rng = rand::thread_rng();

        // Voter ids drawn from a small pool so duplicates are frequent.
        let submissions: Vec<(String, &str)> = (0..4_000)
            .map(|_| {
                let voter = format!("v{}", rng.gen_range(0..1_500));
                let party = PARTIES[rng.gen_range(0..PARTIES.len())];
                (voter, party)
            })
            .collect();

        let accepted: Vec<(String, String)> = submissions
            .par_iter()
            .filter_map(|(voter, party)| {
                intake
                    .submit(ballot(voter, party))
                    .ok()
                    .map(|_| (voter.clone(), party.to_string()))
            })
            .collect();

        let distinct: HashSet<_> = accepted.iter().map(|(v, _)| v).collect();
        assert_eq!(distinct.len(), accepted.len());
        assert_eq!(results.total_votes(), accepted.len() as u64);

        let mut expected: BTreeMap<String, u64> = BTreeMap::new();
        for (_, party) in &accepted {
            *expected.entry(party.clone()).or_default() += 1;
        }
        assert_eq!(results.breakdown(), expected);

        let records = intake.state().audit_log().read_all().unwrap();
        assert_eq!(records.len(), accepted.len());
        let mut audited: BTreeMap<String, u64> = BTreeMap::new();
        for record in &records {
            *audited.entry(record.party_value.clone()).or_default() += 1;
        }
        assert_eq!(audited, expected);
    }

    // =============================================================================
    // READERS
    // =============================================================================

    #[test]
    fn test_results_snapshot_is_internally_consistent() {
        let (intake, results) = make_election();
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let results = results.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut observed = 0u64;
                while !done.load(Ordering::Acquire) {
                    let snapshot = results.results();
                    assert_eq!(snapshot.breakdown.values().sum::<u64>(), snapshot.total_votes);
                    assert!(snapshot.total_votes >= observed);
                    observed = snapshot.total_votes;
                }
            })
        };

        (0..5_000).into_par_iter().for_each(|i| {
            let _ = intake.submit(ballot(&format!("r{i}"), PARTIES[i % PARTIES.len()]));
        });

        done.store(true, Ordering::Release);
        reader.join().unwrap();
        assert_eq!(results.total_votes(), 5_000);
    }

    #[test]
    fn test_has_voted_is_visible_after_acceptance() {
        let (intake, results) = make_election();

        (0..1_000).into_par_iter().for_each(|i| {
            let voter = format!("h{i}");
            intake.submit(ballot(&voter, "A")).unwrap();
            assert!(results.has_voted(&voter));
        });

        assert!(!results.has_voted("h1000"));
    }
}
