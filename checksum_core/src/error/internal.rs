//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// Update invoked on an already-finalized engine
    #[error("Engine for algorithm '{algorithm}' already finalized")]
    EngineFinalized { algorithm: String },
}

impl InternalError {
    /// Create an engine finalized error
    pub fn engine_finalized(algorithm: &str) -> Self {
        Self::EngineFinalized {
            algorithm: algorithm.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_finalized_error() {
        let error = InternalError::engine_finalized("MurmurHash3");
        assert!(error.to_string().contains("already finalized"));
        assert!(error.to_string().contains("MurmurHash3"));
    }
}
