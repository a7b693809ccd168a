//! Digest calculation over bytes, streams and file collections
//!
//! Files and streams are consumed in 64 KiB chunks through a streaming
//! engine, so memory usage stays flat regardless of input size. Digests are
//! rendered as uppercase hex. Batch runs keep going past unreadable files
//! and report the failures alongside the successes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::engine::Engine;
use crate::error::{Error, IoError, Result};
use crate::registry::{AlgorithmRegistry, DEFAULT_ALGORITHM};
use crate::resolver::{self, ResolutionFailure};
use crate::traits::HashAlgorithmImpl;

/// Read buffer size for streams and files
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A computed digest
///
/// `path` is present exactly when the digest was derived from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestResult {
    /// Canonical algorithm name
    pub algorithm: String,
    /// Uppercase hex rendering of the digest
    pub hash: String,
    /// Source file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// A file that could not be hashed during a batch run
#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of hashing a collection of inputs
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Digests for every readable file, in path order
    pub results: Vec<DigestResult>,
    /// Inputs that did not resolve
    pub resolution_failures: Vec<ResolutionFailure>,
    /// Files that resolved but could not be read
    pub read_failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every input produced a digest
    pub fn is_complete(&self) -> bool {
        self.resolution_failures.is_empty() && self.read_failures.is_empty()
    }
}

/// Checksum front end bound to one algorithm
pub struct ChecksumCalculator {
    algorithm: &'static dyn HashAlgorithmImpl,
}

impl std::fmt::Debug for ChecksumCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChecksumCalculator")
            .field("algorithm", &self.algorithm.id())
            .finish()
    }
}

impl ChecksumCalculator {
    /// Create a calculator using the default algorithm
    pub fn new() -> Self {
        Self {
            algorithm: AlgorithmRegistry::global()
                .resolve(DEFAULT_ALGORITHM)
                .unwrap_or_else(|_| unreachable!("default algorithm is always registered")),
        }
    }

    /// Create a calculator for the named algorithm, case-insensitively
    pub fn with_algorithm(name: &str) -> Result<Self> {
        Ok(Self {
            algorithm: AlgorithmRegistry::global().resolve(name)?,
        })
    }

    /// Canonical name of the bound algorithm
    pub fn algorithm(&self) -> &'static str {
        self.algorithm.id()
    }

    fn result(&self, digest: Vec<u8>, path: Option<PathBuf>) -> DigestResult {
        DigestResult {
            algorithm: self.algorithm.id().to_string(),
            hash: hex::encode_upper(digest),
            path,
        }
    }

    /// Hash an in-memory byte slice
    pub fn hash_bytes(&self, data: &[u8]) -> DigestResult {
        self.result(self.algorithm.hash_bytes(data), None)
    }

    /// Hash everything a reader yields
    pub async fn hash_stream<R>(&self, mut reader: R) -> Result<DigestResult>
    where
        R: AsyncRead + Unpin,
    {
        let mut engine = Engine::new(self.algorithm);
        let mut buffer = vec![0u8; CHUNK_SIZE];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            engine.update(&buffer[..n])?;
        }

        Ok(self.result(engine.finalize()?, None))
    }

    /// Hash a single file
    pub async fn hash_file(&self, path: &Path) -> Result<DigestResult> {
        if !path.exists() {
            return Err(IoError::path_not_found(path).into());
        }

        let mut file = File::open(path)
            .await
            .map_err(|source| IoError::read_failure(path, source))?;

        let mut engine = Engine::new(self.algorithm);
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut total: u64 = 0;

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .map_err(|source| IoError::read_failure(path, source))?;
            if n == 0 {
                break;
            }
            total += n as u64;
            engine.update(&buffer[..n])?;
        }

        log::debug!(
            "Hashed {} bytes from {} with {}",
            total,
            path.display(),
            engine.algorithm()
        );
        Ok(self.result(engine.finalize()?, Some(path.to_path_buf())))
    }

    /// Hash every file a set of inputs resolves to
    ///
    /// With `literal` set, inputs are taken verbatim instead of being
    /// expanded as glob patterns. Unreadable files do not stop the run; they
    /// appear in the report's failure lists instead.
    pub async fn hash_paths<S: AsRef<str>>(&self, inputs: &[S], literal: bool) -> Result<BatchReport> {
        let resolution = resolver::resolve_paths(inputs, literal)?;

        let mut report = BatchReport {
            resolution_failures: resolution.failures,
            ..Default::default()
        };

        for path in resolution.files {
            match self.hash_file(&path).await {
                Ok(result) => report.results.push(result),
                Err(error) => {
                    log::warn!("Failed to hash {}: {error}", path.display());
                    report.read_failures.push(BatchFailure { path, error });
                }
            }
        }

        Ok(report)
    }
}

impl Default for ChecksumCalculator {
    fn default() -> Self {
        Self::new()
    }
}
