//! Checksum core library
//!
//! Computes digests of byte buffers, async streams and file collections
//! under a fixed set of cryptographic and non-cryptographic hash algorithms.
//!
//! The pieces:
//! - An [`AlgorithmRegistry`] resolving case-insensitive algorithm names
//! - Streaming [`Engine`]s with chunk-size-independent results
//! - A [`ChecksumCalculator`] front end reading inputs in 64 KiB chunks
//! - A path resolver expanding glob patterns and literal paths
//!
//! # Example
//!
//! ```no_run
//! use checksum_core::ChecksumCalculator;
//!
//! # async fn example() -> checksum_core::Result<()> {
//! let calculator = ChecksumCalculator::with_algorithm("xxHash64")?;
//! let digest = calculator.hash_file(std::path::Path::new("data.bin")).await?;
//! println!("{} {}", digest.hash, digest.path.unwrap().display());
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod resolver;
pub mod traits;

pub use algorithms::CrcParams;
pub use engine::Engine;
pub use error::{Error, InternalError, IoError, IoErrorKind, Result, ValidationError};
pub use pipeline::{BatchFailure, BatchReport, ChecksumCalculator, DigestResult, CHUNK_SIZE};
pub use registry::{AlgorithmRegistry, DEFAULT_ALGORITHM};
pub use resolver::{resolve_paths, Resolution, ResolutionFailure};
pub use traits::{Family, HashAlgorithmImpl, StreamingHasher};
