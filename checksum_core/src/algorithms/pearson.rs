//! Pearson hashing with an 8-bit output
//!
//! The scheme works with any permutation of the byte values. Ours is a
//! Fisher-Yates shuffle of 0..=255 driven by a fixed-seed SplitMix64 stream,
//! which keeps the table stable without embedding 256 literals.

use once_cell::sync::Lazy;

use super::buzhash::splitmix64;
use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

const TABLE_SEED: u64 = 0x5065_6172_736F_6E48;

static TABLE: Lazy<[u8; 256]> = Lazy::new(|| {
    let mut table = [0u8; 256];
    for (index, entry) in table.iter_mut().enumerate() {
        *entry = index as u8;
    }
    let mut state = TABLE_SEED;
    for index in (1..256usize).rev() {
        let other = (splitmix64(&mut state) % (index as u64 + 1)) as usize;
        table.swap(index, other);
    }
    table
});

#[derive(Default)]
struct PearsonHasher {
    state: u8,
}

impl StreamingHasher for PearsonHasher {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state = TABLE[(self.state ^ byte) as usize];
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        vec![self.state]
    }
}

pub struct PearsonAlgorithm;

impl HashAlgorithmImpl for PearsonAlgorithm {
    fn id(&self) -> &'static str {
        "Pearson"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        8
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(PearsonHasher::default())
    }
}
