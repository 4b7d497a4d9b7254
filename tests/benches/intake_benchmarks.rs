//! # Ballot Intake Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | submit (memory) | validation + claim + token, no I/O |
//! | submit (file, no fsync) | full path including JSON encode and append |
//! | duplicate rejection | claim fast path under an existing registry |
//! | results snapshot | read lock + breakdown copy |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ballot_intake::{
    AuditLogConfig, BallotSubmission, ElectionState, FileAuditLog, InMemoryAuditLog, IntakeConfig,
    ResultsApi, ResultsReader, Rotation, VoteIntake, VoteIntakeApi,
};

const PARTIES: [&str; 5] = ["A", "B", "C", "D", "E"];

fn ballot(voter: u64) -> BallotSubmission {
    let party = PARTIES[(voter % PARTIES.len() as u64) as usize];
    BallotSubmission::new(
        format!("bench-{voter}"),
        format!("Party {party}"),
        party,
        "",
        "127.0.0.1",
    )
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("ballot-intake-submit");
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Elements(1));

    let state = Arc::new(ElectionState::new(InMemoryAuditLog::new()));
    let intake = VoteIntake::new(state, IntakeConfig::default());
    let next = AtomicU64::new(0);
    group.bench_function("submit_memory", |b| {
        b.iter(|| black_box(intake.submit(ballot(next.fetch_add(1, Ordering::Relaxed)))))
    });

    let tmp = std::env::temp_dir().join(format!("ballot_bench_{}", std::process::id()));
    let config = AuditLogConfig {
        dir: tmp.clone(),
        rotation: Rotation::Never,
        sync_on_append: false,
    };
    if let Ok(log) = FileAuditLog::open(config) {
        let intake = VoteIntake::new(Arc::new(ElectionState::new(log)), IntakeConfig::default());
        let next = AtomicU64::new(0);
        group.bench_function("submit_file_nosync", |b| {
            b.iter(|| black_box(intake.submit(ballot(next.fetch_add(1, Ordering::Relaxed)))))
        });
    }
    let _ = std::fs::remove_dir_all(&tmp);

    group.finish();
}

fn bench_duplicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("ballot-intake-duplicates");

    for registered in [1_000u64, 100_000] {
        let state = Arc::new(ElectionState::new(InMemoryAuditLog::new()));
        let intake = VoteIntake::new(state, IntakeConfig::default());
        for voter in 0..registered {
            let _ = intake.submit(ballot(voter));
        }

        group.bench_with_input(
            BenchmarkId::new("reject_duplicate", registered),
            &registered,
            |b, &registered| {
                let mut rng = rand::thread_rng();
                b.iter(|| black_box(intake.submit(ballot(rng.gen_range(0..registered)))))
            },
        );
    }

    group.finish();
}

fn bench_results(c: &mut Criterion) {
    let state = Arc::new(ElectionState::new(InMemoryAuditLog::new()));
    let intake = VoteIntake::new(Arc::clone(&state), IntakeConfig::default());
    for voter in 0..10_000 {
        let _ = intake.submit(ballot(voter));
    }
    let results = ResultsReader::new(state);

    c.bench_function("ballot-results-snapshot", |b| {
        b.iter(|| black_box(results.results()))
    });
}

criterion_group!(benches, bench_submit, bench_duplicates, bench_results);
criterion_main!(benches);
