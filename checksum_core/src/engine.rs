//! Runtime-checked streaming hash engine
//!
//! [`Engine`] wraps a [`StreamingHasher`] behind a use-after-finalize guard.
//! The trait enforces single finalization statically by consuming the boxed
//! hasher; `Engine` re-exposes the same contract with runtime errors for
//! callers that hold engines in collections or across await points.

use crate::error::{InternalError, Result};
use crate::traits::{HashAlgorithmImpl, StreamingHasher};

/// A streaming hash computation in progress
pub struct Engine {
    algorithm: &'static str,
    hasher: Option<Box<dyn StreamingHasher>>,
}

impl Engine {
    /// Create an engine for the given algorithm descriptor
    pub fn new(algorithm: &dyn HashAlgorithmImpl) -> Self {
        Self {
            algorithm: algorithm.id(),
            hasher: Some(algorithm.create_hasher()),
        }
    }

    /// Canonical name of the algorithm this engine computes
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    /// Whether `finalize` has already been called
    pub fn is_finalized(&self) -> bool {
        self.hasher.is_none()
    }

    /// Feed a chunk of input into the engine
    ///
    /// Returns an error if the engine was already finalized.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        match self.hasher.as_mut() {
            Some(hasher) => {
                hasher.update(data);
                Ok(())
            }
            None => Err(InternalError::engine_finalized(self.algorithm).into()),
        }
    }

    /// Finalize the computation and return the digest bytes
    ///
    /// Returns an error if the engine was already finalized.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        match self.hasher.take() {
            Some(hasher) => Ok(hasher.finalize()),
            None => Err(InternalError::engine_finalized(self.algorithm).into()),
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("algorithm", &self.algorithm)
            .field("finalized", &self.is_finalized())
            .finish()
    }
}
