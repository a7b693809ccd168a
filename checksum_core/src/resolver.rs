//! Input resolution for files, directories and glob patterns
//!
//! Each input is either a literal path or a glob pattern. Literal paths must
//! exist and refer to files; directories are skipped. Glob patterns are
//! expanded by walking from their longest literal prefix. Resolution never
//! aborts on a bad input, it records the failure and moves on.

use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use walkdir::WalkDir;

use crate::error::{Error, IoError, Result, ValidationError};

/// Outcome of resolving a set of inputs
#[derive(Debug, Default)]
pub struct Resolution {
    /// Files to process, sorted and deduplicated
    pub files: Vec<PathBuf>,
    /// Inputs that could not be resolved
    pub failures: Vec<ResolutionFailure>,
}

/// A single input that failed to resolve
#[derive(Debug)]
pub struct ResolutionFailure {
    /// The input as given by the caller
    pub input: String,
    /// Why it failed
    pub error: Error,
}

impl Resolution {
    /// Whether every input resolved to at least one file
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '[', '{'])
}

/// Longest literal directory prefix of a glob pattern
fn walk_root(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();
    for component in Path::new(pattern).components() {
        match component {
            Component::Normal(part) if is_glob(&part.to_string_lossy()) => break,
            _ => root.push(component),
        }
    }
    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new(pattern)
        .build()
        .map_err(|source| ValidationError::invalid_pattern(pattern, source.to_string()))?
        .compile_matcher();

    let mut matched = Vec::new();
    for entry in WalkDir::new(walk_root(pattern))
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.path()) {
            matched.push(entry.path().to_path_buf());
        }
    }

    if matched.is_empty() {
        return Err(IoError::path_not_found(Path::new(pattern)).into());
    }
    Ok(matched)
}

fn resolve_literal(input: &str) -> Result<Option<PathBuf>> {
    let path = Path::new(input);
    if !path.exists() {
        return Err(IoError::path_not_found(path).into());
    }
    if path.is_dir() {
        log::debug!("Skipping directory input: {}", path.display());
        return Ok(None);
    }
    Ok(Some(path.to_path_buf()))
}

/// Resolve a list of inputs to concrete files
///
/// With `literal` set, every input is taken verbatim and must name an
/// existing entry; otherwise inputs containing glob metacharacters are
/// expanded. A malformed glob pattern aborts resolution; missing paths and
/// patterns with no matches are recorded as failures instead.
pub fn resolve_paths<S: AsRef<str>>(inputs: &[S], literal: bool) -> Result<Resolution> {
    let mut resolution = Resolution::default();

    for input in inputs {
        let input = input.as_ref();
        if !literal && is_glob(input) {
            match expand_glob(input) {
                Ok(files) => resolution.files.extend(files),
                Err(error @ Error::Validation(_)) => return Err(error),
                Err(error) => {
                    log::warn!("Failed to resolve pattern '{input}': {error}");
                    resolution.failures.push(ResolutionFailure {
                        input: input.to_string(),
                        error,
                    });
                }
            }
        } else {
            match resolve_literal(input) {
                Ok(Some(file)) => resolution.files.push(file),
                Ok(None) => {}
                Err(error) => {
                    log::warn!("Failed to resolve path '{input}': {error}");
                    resolution.failures.push(ResolutionFailure {
                        input: input.to_string(),
                        error,
                    });
                }
            }
        }
    }

    resolution.files.sort_unstable();
    resolution.files.dedup();
    Ok(resolution)
}
