//! Buzhash, a cyclic-polynomial hash
//!
//! Each byte rotates the state one bit left and mixes in a table entry. The
//! substitution table is 256 pseudo-random words drawn from a fixed-seed
//! SplitMix64 stream, so the hash is stable across runs and platforms.

use once_cell::sync::Lazy;

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

const TABLE_SEED: u64 = 0xB5AD_4ECE_DA1C_E2A9;

pub(super) fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

static TABLE: Lazy<[u64; 256]> = Lazy::new(|| {
    let mut state = TABLE_SEED;
    let mut table = [0u64; 256];
    for entry in table.iter_mut() {
        *entry = splitmix64(&mut state);
    }
    table
});

#[derive(Default)]
struct BuzhashHasher {
    state: u64,
}

impl StreamingHasher for BuzhashHasher {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state = self.state.rotate_left(1) ^ TABLE[byte as usize];
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.state.to_be_bytes().to_vec()
    }
}

pub struct BuzhashAlgorithm;

impl HashAlgorithmImpl for BuzhashAlgorithm {
    fn id(&self) -> &'static str {
        "Buzhash"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        64
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(BuzhashHasher::default())
    }
}
