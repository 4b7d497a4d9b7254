//! # Ballot Test Suite
//!
//! Unified test crate for properties that span several modules.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks for the submit path
//! └── src/
//!     └── integration/
//!         ├── concurrency.rs   # races, tally consistency, token uniqueness
//!         └── durability.rs    # file audit log, rollback, restart recovery
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ballot-tests
//! cargo test -p ballot-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p ballot-tests
//! ```

pub mod integration;
