//! Test data builders

mod test_data;

pub use test_data::{FixtureTree, TestFileBuilder};
