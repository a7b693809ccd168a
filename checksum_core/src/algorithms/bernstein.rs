//! Bernstein djb2 string hashes
//!
//! The classic variant combines with addition, the modified variant with
//! exclusive or. Both use multiplier 33 and initial state 5381.

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

const INITIAL_STATE: u32 = 5381;

#[derive(Clone, Copy)]
enum Combine {
    Add,
    Xor,
}

struct BernsteinHasher {
    state: u32,
    combine: Combine,
}

impl StreamingHasher for BernsteinHasher {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let scaled = self.state.wrapping_mul(33);
            self.state = match self.combine {
                Combine::Add => scaled.wrapping_add(u32::from(byte)),
                Combine::Xor => scaled ^ u32::from(byte),
            };
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.state.to_be_bytes().to_vec()
    }
}

pub struct BernsteinAlgorithm;

impl HashAlgorithmImpl for BernsteinAlgorithm {
    fn id(&self) -> &'static str {
        "BernsteinHash"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(BernsteinHasher {
            state: INITIAL_STATE,
            combine: Combine::Add,
        })
    }
}

pub struct ModifiedBernsteinAlgorithm;

impl HashAlgorithmImpl for ModifiedBernsteinAlgorithm {
    fn id(&self) -> &'static str {
        "ModifiedBernsteinHash"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(BernsteinHasher {
            state: INITIAL_STATE,
            combine: Combine::Xor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(algorithm: &dyn HashAlgorithmImpl, data: &[u8]) -> u32 {
        u32::from_be_bytes(algorithm.hash_bytes(data).try_into().unwrap())
    }

    #[test]
    fn test_empty_input_yields_initial_state() {
        assert_eq!(value(&BernsteinAlgorithm, b""), INITIAL_STATE);
        assert_eq!(value(&ModifiedBernsteinAlgorithm, b""), INITIAL_STATE);
    }

    #[test]
    fn test_djb2_known_value() {
        assert_eq!(value(&BernsteinAlgorithm, b"hello"), 0x0F92_3099);
    }

    #[test]
    fn test_variants_diverge() {
        assert_ne!(
            BernsteinAlgorithm.hash_bytes(b"hello"),
            ModifiedBernsteinAlgorithm.hash_bytes(b"hello")
        );
    }

    #[test]
    fn test_chunked_update_matches_oneshot() {
        let mut hasher = ModifiedBernsteinAlgorithm.create_hasher();
        hasher.update(b"hel");
        hasher.update(b"lo");
        assert_eq!(
            hasher.finalize(),
            ModifiedBernsteinAlgorithm.hash_bytes(b"hello")
        );
    }
}
