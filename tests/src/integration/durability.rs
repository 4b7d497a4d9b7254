//! # Durability Properties
//!
//! File-backed audit log under concurrent load, storage faults and restarts:
//!
//! 1. **One line per accepted vote**, none torn, no rejected vote written
//! 2. **Rollback**: a failed append leaves the voter unclaimed and retryable
//! 3. **Restart**: replaying the log restores registry and tally exactly
//! 4. **Single writer**: a second process-level lock on the directory is refused

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use rayon::prelude::*;
    use tempfile::TempDir;

    use ballot_intake::{
        AuditDirLock, AuditLog, AuditLogConfig, BallotSubmission, ElectionState, FaultyAuditLog,
        FileAuditLog, FixedTimeSource, IntakeConfig, IntakeError, LockError, ResultsApi,
        ResultsReader, Rotation, VoteIntake, VoteIntakeApi, VoteRecord,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn audit_config(tmp: &TempDir) -> AuditLogConfig {
        AuditLogConfig {
            dir: tmp.path().join("vote_logs"),
            rotation: Rotation::Never,
            sync_on_append: false,
        }
    }

    fn ballot(voter: &str, party: &str) -> BallotSubmission {
        BallotSubmission::new(voter, format!("Party {party}"), party, "1/1/2026", "192.0.2.4")
    }

    fn segment_lines(config: &AuditLogConfig) -> Vec<String> {
        fs::read_to_string(config.dir.join("votes.jsonl"))
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    // =============================================================================
    // CONCURRENT APPENDS
    // =============================================================================

    #[test]
    fn test_concurrent_submissions_write_one_line_each() {
        let tmp = TempDir::new().unwrap();
        let config = audit_config(&tmp);
        let state = Arc::new(ElectionState::new(FileAuditLog::open(config.clone()).unwrap()));
        let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());

        // Every voter submits twice; only the first of each pair may land.
        let accepted = (0..2_000)
            .into_par_iter()
            .filter(|i| intake.submit(ballot(&format!("f{}", i / 2), "A")).is_ok())
            .count();

        assert_eq!(accepted, 1_000);

        let lines = segment_lines(&config);
        assert_eq!(lines.len(), accepted);
        for line in &lines {
            let record: VoteRecord = serde_json::from_str(line).unwrap();
            assert_eq!(record.party_value, "A");
            assert_eq!(record.source_address, "192.0.2.4");
        }

        let tokens: std::collections::HashSet<_> = state
            .audit_log()
            .read_all()
            .unwrap()
            .into_iter()
            .map(|r| r.confirmation_token)
            .collect();
        assert_eq!(tokens.len(), accepted);
    }

    #[test]
    fn test_rejected_submissions_are_never_written() {
        let tmp = TempDir::new().unwrap();
        let config = audit_config(&tmp);
        let state = Arc::new(ElectionState::new(FileAuditLog::open(config.clone()).unwrap()));
        let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());

        intake.submit(ballot("V1", "A")).unwrap();
        let mut missing = ballot("V2", "A");
        missing.party_name = None;
        assert!(intake.submit(missing).is_err());
        assert!(intake.submit(ballot("V1", "B")).is_err());

        assert_eq!(segment_lines(&config).len(), 1);
    }

    // =============================================================================
    // STORAGE FAULTS
    // =============================================================================

    #[test]
    fn test_outage_rolls_back_then_recovers() {
        let tmp = TempDir::new().unwrap();
        let config = audit_config(&tmp);
        let log = FaultyAuditLog::new(FileAuditLog::open(config.clone()).unwrap());
        let state = Arc::new(ElectionState::new(log));
        let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());
        let results = ResultsReader::new(Arc::clone(&state));

        intake.submit(ballot("V1", "A")).unwrap();

        state.audit_log().fail_appends(true);
        let failed: Vec<_> = (2..50)
            .into_par_iter()
            .map(|i| intake.submit(ballot(&format!("V{i}"), "B")))
            .collect();
        assert!(failed
            .iter()
            .all(|r| matches!(r, Err(IntakeError::PersistenceFailure { .. }))));
        assert_eq!(results.total_votes(), 1);
        assert!(!results.breakdown().contains_key("B"));

        state.audit_log().fail_appends(false);
        for i in 2..50 {
            intake.submit(ballot(&format!("V{i}"), "B")).unwrap();
        }

        assert_eq!(results.total_votes(), 49);
        assert_eq!(results.breakdown()["B"], 48);
        assert_eq!(segment_lines(&config).len(), 49);
    }

    // =============================================================================
    // RESTART
    // =============================================================================

    #[test]
    fn test_restart_replay_restores_state() {
        let tmp = TempDir::new().unwrap();
        let config = AuditLogConfig {
            rotation: Rotation::Daily,
            ..audit_config(&tmp)
        };

        let before = {
            let state = Arc::new(ElectionState::new(FileAuditLog::open(config.clone()).unwrap()));
            let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());
            for i in 0..300 {
                intake
                    .submit(ballot(&format!("p{i}"), ["A", "B", "C"][i % 3]))
                    .unwrap();
            }
            ResultsReader::new(state).results()
        };

        let state = Arc::new(ElectionState::new(FileAuditLog::open(config).unwrap()));
        let report = state.recover().unwrap();
        let results = ResultsReader::new(Arc::clone(&state));

        assert_eq!(report.replayed, 300);
        assert_eq!(report.skipped, 0);
        assert_eq!(results.results(), before);

        let intake = VoteIntake::new(state, IntakeConfig::default());
        assert!(matches!(
            intake.submit(ballot("p7", "A")),
            Err(IntakeError::DuplicateVote { .. })
        ));
        intake.submit(ballot("p300", "A")).unwrap();
        assert_eq!(results.total_votes(), 301);
    }

    #[test]
    fn test_crash_mid_append_is_repaired_on_restart() {
        let tmp = TempDir::new().unwrap();
        let config = audit_config(&tmp);
        {
            let state = Arc::new(ElectionState::new(FileAuditLog::open(config.clone()).unwrap()));
            let intake = VoteIntake::new(state, IntakeConfig::default());
            intake.submit(ballot("V1", "A")).unwrap();
            intake.submit(ballot("V2", "B")).unwrap();
        }

        // Simulate a crash halfway through a third record.
        let path = config.dir.join("votes.jsonl");
        let mut raw = fs::read(&path).unwrap();
        raw.extend_from_slice(br#"{"voterId":"V3","partyName":"Par"#);
        fs::write(&path, raw).unwrap();

        let state = Arc::new(ElectionState::new(FileAuditLog::open(config.clone()).unwrap()));
        let report = state.recover().unwrap();
        assert_eq!(report.replayed, 2);

        let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());
        intake.submit(ballot("V3", "C")).unwrap();
        assert_eq!(segment_lines(&config).len(), 3);
    }

    #[test]
    fn test_crash_in_previous_day_segment_does_not_block_recovery() {
        const DAY_ONE: u64 = 1_700_000_000_000; // 2023-11-14 UTC
        const DAY_TWO: u64 = DAY_ONE + 86_400_000;

        let tmp = TempDir::new().unwrap();
        let config = AuditLogConfig {
            rotation: Rotation::Daily,
            ..audit_config(&tmp)
        };
        {
            let log = FileAuditLog::with_time_source(config.clone(), Arc::new(FixedTimeSource(DAY_ONE)))
                .unwrap();
            let state = Arc::new(ElectionState::new(log));
            let intake = VoteIntake::new(state, IntakeConfig::default());
            intake.submit(ballot("V1", "A")).unwrap();
        }

        let day_one = config.dir.join("votes_2023-11-14.jsonl");
        let mut raw = fs::read(&day_one).unwrap();
        raw.extend_from_slice(br#"{"voterId":"V2","par"#);
        fs::write(&day_one, raw).unwrap();

        let log =
            FileAuditLog::with_time_source(config.clone(), Arc::new(FixedTimeSource(DAY_TWO))).unwrap();
        let state = Arc::new(ElectionState::new(log));
        let report = state.recover().unwrap();
        assert_eq!(report.replayed, 1);

        // The voter whose record was torn never got a durable vote.
        let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());
        intake.submit(ballot("V2", "B")).unwrap();
        assert_eq!(state.audit_log().read_all().unwrap().len(), 2);
    }

    // =============================================================================
    // SINGLE WRITER
    // =============================================================================

    #[test]
    fn test_second_writer_is_locked_out() {
        let tmp = TempDir::new().unwrap();
        let config = audit_config(&tmp);

        let lock = AuditDirLock::acquire(&config.dir).unwrap();
        assert!(matches!(
            AuditDirLock::acquire(&config.dir),
            Err(LockError::AlreadyLocked { .. })
        ));

        // The lock file is not mistaken for an audit segment.
        let log = FileAuditLog::open(config.clone()).unwrap();
        assert!(log.read_all().unwrap().is_empty());

        drop(lock);
        assert!(AuditDirLock::acquire(&config.dir).is_ok());
    }
}
