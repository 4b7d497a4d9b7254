//! # Integration Tests
//!
//! - `concurrency`: many submitters against one `ElectionState`
//! - `durability`: file-backed audit log behaviour across failures and restarts

pub mod concurrency;
pub mod durability;
