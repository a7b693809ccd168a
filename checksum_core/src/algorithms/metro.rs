//! MetroHash 64 and 128 bit, incremental variant, seed 0
//!
//! Both widths consume 32-byte blocks through four rotating accumulators
//! and cascade the remainder through progressively narrower reads. Each
//! width carries its own constant set.

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

fn read_u64(data: &[u8]) -> u64 {
    u64::from_le_bytes(data[..8].try_into().unwrap())
}

fn read_u32(data: &[u8]) -> u64 {
    u64::from(u32::from_le_bytes(data[..4].try_into().unwrap()))
}

fn read_u16(data: &[u8]) -> u64 {
    u64::from(u16::from_le_bytes(data[..2].try_into().unwrap()))
}

struct BlockBuffer {
    buffer: [u8; 32],
    buffered: usize,
    total_len: u64,
}

impl BlockBuffer {
    fn new() -> Self {
        Self {
            buffer: [0; 32],
            buffered: 0,
            total_len: 0,
        }
    }

    /// Feed data, invoking `consume` for every complete 32-byte block
    fn fill(&mut self, mut data: &[u8], mut consume: impl FnMut(&[u8])) {
        self.total_len += data.len() as u64;

        if self.buffered > 0 {
            let take = (32 - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < 32 {
                return;
            }
            let block = self.buffer;
            consume(&block);
            self.buffered = 0;
        }

        while data.len() >= 32 {
            let (block, rest) = data.split_at(32);
            consume(block);
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    fn tail(&self) -> &[u8] {
        &self.buffer[..self.buffered]
    }
}

mod k64 {
    pub const K0: u64 = 0xD6D0_18F5;
    pub const K1: u64 = 0xA2AA_033B;
    pub const K2: u64 = 0x6299_2FC1;
    pub const K3: u64 = 0x30BC_5B29;
}

struct MetroHash64Hasher {
    v: [u64; 4],
    vseed: u64,
    buffer: BlockBuffer,
}

impl MetroHash64Hasher {
    fn new() -> Self {
        let vseed = k64::K2.wrapping_mul(k64::K0);
        Self {
            v: [vseed; 4],
            vseed,
            buffer: BlockBuffer::new(),
        }
    }

    fn consume_block(v: &mut [u64; 4], block: &[u8]) {
        use k64::*;
        v[0] = v[0]
            .wrapping_add(read_u64(&block[0..]).wrapping_mul(K0))
            .rotate_right(29)
            .wrapping_add(v[2]);
        v[1] = v[1]
            .wrapping_add(read_u64(&block[8..]).wrapping_mul(K1))
            .rotate_right(29)
            .wrapping_add(v[3]);
        v[2] = v[2]
            .wrapping_add(read_u64(&block[16..]).wrapping_mul(K2))
            .rotate_right(29)
            .wrapping_add(v[0]);
        v[3] = v[3]
            .wrapping_add(read_u64(&block[24..]).wrapping_mul(K3))
            .rotate_right(29)
            .wrapping_add(v[1]);
    }
}

impl StreamingHasher for MetroHash64Hasher {
    fn update(&mut self, data: &[u8]) {
        let v = &mut self.v;
        self.buffer.fill(data, |block| Self::consume_block(v, block));
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        use k64::*;

        let mut v = self.v;
        let mut hash = if self.buffer.total_len >= 32 {
            v[2] ^= v[0]
                .wrapping_add(v[3])
                .wrapping_mul(K0)
                .wrapping_add(v[1])
                .rotate_right(37)
                .wrapping_mul(K1);
            v[3] ^= v[1]
                .wrapping_add(v[2])
                .wrapping_mul(K1)
                .wrapping_add(v[0])
                .rotate_right(37)
                .wrapping_mul(K0);
            v[0] ^= v[0]
                .wrapping_add(v[2])
                .wrapping_mul(K0)
                .wrapping_add(v[3])
                .rotate_right(37)
                .wrapping_mul(K1);
            v[1] ^= v[1]
                .wrapping_add(v[3])
                .wrapping_mul(K1)
                .wrapping_add(v[2])
                .rotate_right(37)
                .wrapping_mul(K0);
            self.vseed.wrapping_add(v[0] ^ v[1])
        } else {
            self.vseed
        };

        let mut tail = self.buffer.tail();
        if tail.len() >= 16 {
            let mut v0 = hash.wrapping_add(read_u64(&tail[0..]).wrapping_mul(K2));
            v0 = v0.rotate_right(29).wrapping_mul(K3);
            let mut v1 = hash.wrapping_add(read_u64(&tail[8..]).wrapping_mul(K2));
            v1 = v1.rotate_right(29).wrapping_mul(K3);
            v0 ^= v0.wrapping_mul(K0).rotate_right(21).wrapping_add(v1);
            v1 ^= v1.wrapping_mul(K3).rotate_right(21).wrapping_add(v0);
            hash = hash.wrapping_add(v1);
            tail = &tail[16..];
        }
        if tail.len() >= 8 {
            hash = hash.wrapping_add(read_u64(tail).wrapping_mul(K3));
            hash ^= hash.rotate_right(55).wrapping_mul(K1);
            tail = &tail[8..];
        }
        if tail.len() >= 4 {
            hash = hash.wrapping_add(read_u32(tail).wrapping_mul(K3));
            hash ^= hash.rotate_right(26).wrapping_mul(K1);
            tail = &tail[4..];
        }
        if tail.len() >= 2 {
            hash = hash.wrapping_add(read_u16(tail).wrapping_mul(K3));
            hash ^= hash.rotate_right(48).wrapping_mul(K1);
            tail = &tail[2..];
        }
        if !tail.is_empty() {
            hash = hash.wrapping_add(u64::from(tail[0]).wrapping_mul(K3));
            hash ^= hash.rotate_right(37).wrapping_mul(K1);
        }

        hash ^= hash.rotate_right(28);
        hash = hash.wrapping_mul(K0);
        hash ^= hash.rotate_right(29);
        hash.to_be_bytes().to_vec()
    }
}

pub struct MetroHash64Algorithm;

impl HashAlgorithmImpl for MetroHash64Algorithm {
    fn id(&self) -> &'static str {
        "MetroHash64"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        64
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(MetroHash64Hasher::new())
    }
}

mod k128 {
    pub const K0: u64 = 0xC83A_91E1;
    pub const K1: u64 = 0x8648_DBDB;
    pub const K2: u64 = 0x7BDE_C03B;
    pub const K3: u64 = 0x2F58_70A5;
}

struct MetroHash128Hasher {
    v: [u64; 4],
    buffer: BlockBuffer,
}

impl MetroHash128Hasher {
    fn new() -> Self {
        use k128::*;
        Self {
            v: [
                0u64.wrapping_sub(K0).wrapping_mul(K3),
                K1.wrapping_mul(K2),
                K0.wrapping_mul(K2),
                0u64.wrapping_sub(K1).wrapping_mul(K3),
            ],
            buffer: BlockBuffer::new(),
        }
    }

    fn consume_block(v: &mut [u64; 4], block: &[u8]) {
        use k128::*;
        v[0] = v[0]
            .wrapping_add(read_u64(&block[0..]).wrapping_mul(K0))
            .rotate_right(29)
            .wrapping_add(v[2]);
        v[1] = v[1]
            .wrapping_add(read_u64(&block[8..]).wrapping_mul(K1))
            .rotate_right(29)
            .wrapping_add(v[3]);
        v[2] = v[2]
            .wrapping_add(read_u64(&block[16..]).wrapping_mul(K2))
            .rotate_right(29)
            .wrapping_add(v[0]);
        v[3] = v[3]
            .wrapping_add(read_u64(&block[24..]).wrapping_mul(K3))
            .rotate_right(29)
            .wrapping_add(v[1]);
    }
}

impl StreamingHasher for MetroHash128Hasher {
    fn update(&mut self, data: &[u8]) {
        let v = &mut self.v;
        self.buffer.fill(data, |block| Self::consume_block(v, block));
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        use k128::*;

        let mut v = self.v;
        if self.buffer.total_len >= 32 {
            v[2] ^= v[0]
                .wrapping_add(v[3])
                .wrapping_mul(K0)
                .wrapping_add(v[1])
                .rotate_right(21)
                .wrapping_mul(K1);
            v[3] ^= v[1]
                .wrapping_add(v[2])
                .wrapping_mul(K1)
                .wrapping_add(v[0])
                .rotate_right(21)
                .wrapping_mul(K0);
            v[0] ^= v[0]
                .wrapping_add(v[2])
                .wrapping_mul(K0)
                .wrapping_add(v[3])
                .rotate_right(21)
                .wrapping_mul(K1);
            v[1] ^= v[1]
                .wrapping_add(v[3])
                .wrapping_mul(K1)
                .wrapping_add(v[2])
                .rotate_right(21)
                .wrapping_mul(K0);
        }
        let mut v0 = v[0];
        let mut v1 = v[1];

        let mut tail = self.buffer.tail();
        if tail.len() >= 16 {
            v0 = v0
                .wrapping_add(read_u64(&tail[0..]).wrapping_mul(K2))
                .rotate_right(33)
                .wrapping_mul(K3);
            v1 = v1
                .wrapping_add(read_u64(&tail[8..]).wrapping_mul(K2))
                .rotate_right(33)
                .wrapping_mul(K3);
            v0 ^= v0.wrapping_mul(K2).wrapping_add(v1).rotate_right(45).wrapping_mul(K1);
            v1 ^= v1.wrapping_mul(K3).wrapping_add(v0).rotate_right(45).wrapping_mul(K0);
            tail = &tail[16..];
        }
        if tail.len() >= 8 {
            v0 = v0
                .wrapping_add(read_u64(tail).wrapping_mul(K2))
                .rotate_right(33)
                .wrapping_mul(K3);
            v0 ^= v0.wrapping_mul(K2).wrapping_add(v1).rotate_right(27).wrapping_mul(K1);
            tail = &tail[8..];
        }
        if tail.len() >= 4 {
            v1 = v1
                .wrapping_add(read_u32(tail).wrapping_mul(K2))
                .rotate_right(33)
                .wrapping_mul(K3);
            v1 ^= v1.wrapping_mul(K3).wrapping_add(v0).rotate_right(46).wrapping_mul(K0);
            tail = &tail[4..];
        }
        if tail.len() >= 2 {
            v0 = v0
                .wrapping_add(read_u16(tail).wrapping_mul(K2))
                .rotate_right(33)
                .wrapping_mul(K3);
            v0 ^= v0.wrapping_mul(K2).wrapping_add(v1).rotate_right(22).wrapping_mul(K1);
            tail = &tail[2..];
        }
        if !tail.is_empty() {
            v1 = v1
                .wrapping_add(u64::from(tail[0]).wrapping_mul(K2))
                .rotate_right(33)
                .wrapping_mul(K3);
            v1 ^= v1.wrapping_mul(K3).wrapping_add(v0).rotate_right(58).wrapping_mul(K0);
        }

        v0 = v0.wrapping_add(v0.wrapping_mul(K0).wrapping_add(v1).rotate_right(13));
        v1 = v1.wrapping_add(v1.wrapping_mul(K1).wrapping_add(v0).rotate_right(37));
        v0 = v0.wrapping_add(v0.wrapping_mul(K2).wrapping_add(v1).rotate_right(13));
        v1 = v1.wrapping_add(v1.wrapping_mul(K3).wrapping_add(v0).rotate_right(37));

        let mut digest = Vec::with_capacity(16);
        digest.extend_from_slice(&v0.to_be_bytes());
        digest.extend_from_slice(&v1.to_be_bytes());
        digest
    }
}

pub struct MetroHash128Algorithm;

impl HashAlgorithmImpl for MetroHash128Algorithm {
    fn id(&self) -> &'static str {
        "MetroHash128"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        128
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(MetroHash128Hasher::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;

    /// The 63-byte ASCII key the reference implementation publishes its
    /// test vectors for.
    const TEST_KEY: &[u8] = b"012345678901234567890123456789012345678901234567890123456789012";

    fn value64(data: &[u8]) -> u64 {
        u64::from_be_bytes(MetroHash64Algorithm.hash_bytes(data).try_into().unwrap())
    }

    fn value128(data: &[u8]) -> (u64, u64) {
        let digest = MetroHash128Algorithm.hash_bytes(data);
        (
            u64::from_be_bytes(digest[..8].try_into().unwrap()),
            u64::from_be_bytes(digest[8..].try_into().unwrap()),
        )
    }

    #[test]
    fn test_output_widths() {
        assert_eq!(MetroHash64Algorithm.hash_bytes(b"metro").len(), 8);
        assert_eq!(MetroHash128Algorithm.hash_bytes(b"metro").len(), 16);
    }

    #[test]
    fn test_published_vector_64() {
        // reference output bytes are the little-endian state
        let expected = u64::from_le_bytes([0x6B, 0x75, 0x3D, 0xAE, 0x06, 0x70, 0x4B, 0xAD]);
        assert_eq!(value64(TEST_KEY), expected);
    }

    #[test]
    fn test_published_vector_128() {
        let expected = (
            u64::from_le_bytes([0xC7, 0x7C, 0xE2, 0xBF, 0xA4, 0xED, 0x9F, 0x9B]),
            u64::from_le_bytes([0x05, 0x48, 0xB2, 0xAC, 0x50, 0x74, 0xA2, 0x97]),
        );
        assert_eq!(value128(TEST_KEY), expected);
    }

    #[test]
    fn test_matches_reference_crate_at_every_length() {
        let data: Vec<u8> = (0..=255).cycle().take(200).collect();

        for len in 0..=data.len() {
            let mut reference = metrohash::MetroHash64::with_seed(0);
            reference.write(&data[..len]);
            assert_eq!(value64(&data[..len]), reference.finish(), "64-bit, len {len}");

            let mut reference = metrohash::MetroHash128::with_seed(0);
            reference.write(&data[..len]);
            assert_eq!(
                value128(&data[..len]),
                reference.finish128(),
                "128-bit, len {len}"
            );
        }
    }

    #[test]
    fn test_chunked_update_matches_oneshot() {
        let data: Vec<u8> = (0..=255).cycle().take(333).collect();

        for chunk_size in [1, 13, 32, 33, 100] {
            let mut hasher64 = MetroHash64Algorithm.create_hasher();
            let mut hasher128 = MetroHash128Algorithm.create_hasher();
            for chunk in data.chunks(chunk_size) {
                hasher64.update(chunk);
                hasher128.update(chunk);
            }
            assert_eq!(hasher64.finalize(), MetroHash64Algorithm.hash_bytes(&data));
            assert_eq!(
                hasher128.finalize(),
                MetroHash128Algorithm.hash_bytes(&data)
            );
        }
    }
}
