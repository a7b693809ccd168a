//! Test utilities for the checksum library
//!
//! Builders for deterministic test files and directory fixtures used by the
//! integration tests.

pub mod builders;

pub use builders::{FixtureTree, TestFileBuilder};
