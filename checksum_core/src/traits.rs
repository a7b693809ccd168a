//! Core traits for the hash algorithm extensibility system

/// Algorithm family classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Cryptographic digest (SHA family, MD5, Blake2)
    Cryptographic,
    /// Non-cryptographic checksum or dispersion hash
    NonCryptographic,
}

/// Descriptor and factory for one hash algorithm
///
/// One implementation exists per registered algorithm. The descriptor is
/// immutable; per-invocation state lives in the [`StreamingHasher`] it
/// constructs.
pub trait HashAlgorithmImpl: Send + Sync {
    /// Canonical name for this algorithm (resolved case-insensitively)
    fn id(&self) -> &'static str;

    /// Which family this algorithm belongs to
    fn family(&self) -> Family;

    /// Digest width in bits
    fn output_bits(&self) -> usize;

    /// Create a new streaming hasher instance
    fn create_hasher(&self) -> Box<dyn StreamingHasher>;

    /// Calculate the digest of in-memory data
    fn hash_bytes(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

impl std::fmt::Debug for dyn HashAlgorithmImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashAlgorithmImpl")
            .field("id", &self.id())
            .finish()
    }
}

/// Trait for incremental hash calculation
///
/// Implementations buffer partial blocks internally so that the digest is
/// identical regardless of how the input is chunked across `update` calls.
/// `finalize` consumes the hasher; further updates are a type error.
pub trait StreamingHasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the calculation and return the digest bytes
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AlgorithmRegistry;

    #[test]
    fn test_hash_bytes_matches_streaming() {
        let registry = AlgorithmRegistry::global();
        for id in registry.list() {
            let algo = registry.resolve(id).unwrap();
            let direct = algo.hash_bytes(b"consistency check");

            let mut hasher = algo.create_hasher();
            hasher.update(b"consistency ");
            hasher.update(b"check");
            let streamed = hasher.finalize();

            assert_eq!(direct, streamed, "mismatch for {id}");
        }
    }

    #[test]
    fn test_digest_width_matches_descriptor() {
        let registry = AlgorithmRegistry::global();
        for id in registry.list() {
            let algo = registry.resolve(id).unwrap();
            let digest = algo.hash_bytes(b"");
            assert_eq!(
                digest.len() * 8,
                algo.output_bits(),
                "digest width mismatch for {id}"
            );
        }
    }
}
