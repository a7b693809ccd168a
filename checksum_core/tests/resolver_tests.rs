//! Input resolution integration tests

use checksum_core::{resolve_paths, Error, IoErrorKind};
use checksum_test_utils::FixtureTree;

fn tree() -> FixtureTree {
    FixtureTree::new()
        .unwrap()
        .file("src/main.rs", b"fn main() {}\n")
        .unwrap()
        .file("src/lib.rs", b"pub mod hash;\n")
        .unwrap()
        .file("src/hash/mod.rs", b"// hash module\n")
        .unwrap()
        .file("README.md", b"# readme\n")
        .unwrap()
        .dir("target")
        .unwrap()
}

#[test]
fn literal_and_glob_inputs_mix() {
    let tree = tree();
    let resolution = resolve_paths(&[tree.input("README.md"), tree.input("src/*.rs")], false).unwrap();

    assert!(resolution.is_complete());
    assert_eq!(resolution.files.len(), 3);
}

#[test]
fn recursive_glob_reaches_nested_files() {
    let tree = tree();
    let resolution = resolve_paths(&[tree.input("src/**/*.rs")], false).unwrap();

    assert_eq!(resolution.files.len(), 3);
    assert!(resolution
        .files
        .iter()
        .any(|path| path.ends_with("hash/mod.rs")));
}

#[test]
fn directory_literal_is_silently_skipped() {
    let tree = tree();
    let resolution = resolve_paths(&[tree.input("target")], false).unwrap();

    assert!(resolution.is_complete());
    assert!(resolution.files.is_empty());
}

#[test]
fn missing_literal_reports_path_not_found() {
    let tree = tree();
    let resolution = resolve_paths(&[tree.input("Cargo.toml")], false).unwrap();

    assert_eq!(resolution.failures.len(), 1);
    match &resolution.failures[0].error {
        Error::Io(io_error) => assert_eq!(io_error.kind, IoErrorKind::PathNotFound),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unmatched_glob_reports_path_not_found() {
    let tree = tree();
    let resolution = resolve_paths(&[tree.input("*.toml")], false).unwrap();

    assert_eq!(resolution.failures.len(), 1);
    assert_eq!(resolution.failures[0].input, tree.input("*.toml"));
}

#[test]
fn results_are_sorted_and_unique() {
    let tree = tree();
    let resolution = resolve_paths(
        &[
            tree.input("src/*.rs"),
            tree.input("src/main.rs"),
            tree.input("src/lib.rs"),
        ],
        false,
    )
    .unwrap();

    assert_eq!(resolution.files.len(), 2);
    let mut sorted = resolution.files.clone();
    sorted.sort();
    assert_eq!(resolution.files, sorted);
}
