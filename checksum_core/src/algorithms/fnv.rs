//! Fowler-Noll-Vo hashes, 64-bit variants
//!
//! FNV-1 multiplies before mixing each byte, FNV-1a mixes first. Same offset
//! basis and prime for both.

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

const OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01B3;

struct FnvHasher {
    state: u64,
    mix_first: bool,
}

impl StreamingHasher for FnvHasher {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            if self.mix_first {
                self.state ^= u64::from(byte);
                self.state = self.state.wrapping_mul(PRIME);
            } else {
                self.state = self.state.wrapping_mul(PRIME);
                self.state ^= u64::from(byte);
            }
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.state.to_be_bytes().to_vec()
    }
}

pub struct Fnv1Algorithm;

impl HashAlgorithmImpl for Fnv1Algorithm {
    fn id(&self) -> &'static str {
        "FNV1"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        64
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(FnvHasher {
            state: OFFSET_BASIS,
            mix_first: false,
        })
    }
}

pub struct Fnv1aAlgorithm;

impl HashAlgorithmImpl for Fnv1aAlgorithm {
    fn id(&self) -> &'static str {
        "FNV1a"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        64
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(FnvHasher {
            state: OFFSET_BASIS,
            mix_first: true,
        })
    }
}
