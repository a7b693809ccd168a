//! MurmurHash3 x86 32-bit, seed 0

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

const C1: u32 = 0xCC9E_2D51;
const C2: u32 = 0x1B87_3593;

struct Murmur3Hasher {
    state: u32,
    buffer: [u8; 4],
    buffered: usize,
    total_len: u64,
}

impl Murmur3Hasher {
    fn new() -> Self {
        Self {
            state: 0,
            buffer: [0; 4],
            buffered: 0,
            total_len: 0,
        }
    }

    fn consume_block(&mut self, block: &[u8]) {
        let mut k = u32::from_le_bytes(block.try_into().unwrap());
        k = k.wrapping_mul(C1);
        k = k.rotate_left(15);
        k = k.wrapping_mul(C2);
        self.state ^= k;
        self.state = self.state.rotate_left(13);
        self.state = self.state.wrapping_mul(5).wrapping_add(0xE654_6B64);
    }
}

impl StreamingHasher for Murmur3Hasher {
    fn update(&mut self, mut data: &[u8]) {
        self.total_len += data.len() as u64;

        if self.buffered > 0 {
            let take = (4 - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < 4 {
                return;
            }
            let block = self.buffer;
            self.consume_block(&block);
            self.buffered = 0;
        }

        while data.len() >= 4 {
            let (block, rest) = data.split_at(4);
            self.consume_block(block);
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let mut hash = self.state;

        let mut k = 0u32;
        for position in (0..self.buffered).rev() {
            k ^= u32::from(self.buffer[position]) << (8 * position);
        }
        if self.buffered > 0 {
            k = k.wrapping_mul(C1);
            k = k.rotate_left(15);
            k = k.wrapping_mul(C2);
            hash ^= k;
        }

        hash ^= self.total_len as u32;
        hash ^= hash >> 16;
        hash = hash.wrapping_mul(0x85EB_CA6B);
        hash ^= hash >> 13;
        hash = hash.wrapping_mul(0xC2B2_AE35);
        hash ^= hash >> 16;
        hash.to_be_bytes().to_vec()
    }
}

pub struct Murmur3Algorithm;

impl HashAlgorithmImpl for Murmur3Algorithm {
    fn id(&self) -> &'static str {
        "MurmurHash3"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Murmur3Hasher::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(data: &[u8]) -> u32 {
        u32::from_be_bytes(Murmur3Algorithm.hash_bytes(data).try_into().unwrap())
    }

    #[test]
    fn test_empty_with_zero_seed() {
        assert_eq!(value(b""), 0);
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(value(b"test"), 0xBA6B_D213);
        assert_eq!(value(b"Hello, world!"), 0xC036_3E43);
    }

    #[test]
    fn test_tail_lengths() {
        // every remainder class against chunked feeding
        for len in [1usize, 2, 3, 4, 5, 6, 7, 8] {
            let data: Vec<u8> = (1..=len as u8).collect();
            let oneshot = Murmur3Algorithm.hash_bytes(&data);

            let mut hasher = Murmur3Algorithm.create_hasher();
            for chunk in data.chunks(3) {
                hasher.update(chunk);
            }
            assert_eq!(hasher.finalize(), oneshot, "len {len}");
        }
    }
}
