//! xxHash 32-bit and 64-bit, seed 0
//!
//! Stripe accumulators are only merged at finalization, so both hashers
//! remember whether a full stripe was ever consumed to pick the correct
//! small-input path.

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

const PRIME32_1: u32 = 0x9E37_79B1;
const PRIME32_2: u32 = 0x85EB_CA77;
const PRIME32_3: u32 = 0xC2B2_AE3D;
const PRIME32_4: u32 = 0x27D4_EB2F;
const PRIME32_5: u32 = 0x1656_67B1;

struct XxHash32Hasher {
    acc: [u32; 4],
    buffer: [u8; 16],
    buffered: usize,
    total_len: u64,
}

impl XxHash32Hasher {
    fn new() -> Self {
        Self {
            acc: [
                PRIME32_1.wrapping_add(PRIME32_2),
                PRIME32_2,
                0,
                0u32.wrapping_sub(PRIME32_1),
            ],
            buffer: [0; 16],
            buffered: 0,
            total_len: 0,
        }
    }

    fn round(acc: u32, lane: u32) -> u32 {
        acc.wrapping_add(lane.wrapping_mul(PRIME32_2))
            .rotate_left(13)
            .wrapping_mul(PRIME32_1)
    }

    fn consume_stripe(&mut self, stripe: &[u8]) {
        for (index, lane) in stripe.chunks_exact(4).enumerate() {
            let lane = u32::from_le_bytes(lane.try_into().unwrap());
            self.acc[index] = Self::round(self.acc[index], lane);
        }
    }
}

impl StreamingHasher for XxHash32Hasher {
    fn update(&mut self, mut data: &[u8]) {
        self.total_len += data.len() as u64;

        if self.buffered > 0 {
            let take = (16 - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < 16 {
                return;
            }
            let stripe = self.buffer;
            self.consume_stripe(&stripe);
            self.buffered = 0;
        }

        while data.len() >= 16 {
            let (stripe, rest) = data.split_at(16);
            self.consume_stripe(stripe);
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let mut hash = if self.total_len >= 16 {
            self.acc[0]
                .rotate_left(1)
                .wrapping_add(self.acc[1].rotate_left(7))
                .wrapping_add(self.acc[2].rotate_left(12))
                .wrapping_add(self.acc[3].rotate_left(18))
        } else {
            PRIME32_5
        };

        hash = hash.wrapping_add(self.total_len as u32);

        let mut tail = &self.buffer[..self.buffered];
        while tail.len() >= 4 {
            let lane = u32::from_le_bytes(tail[..4].try_into().unwrap());
            hash = hash
                .wrapping_add(lane.wrapping_mul(PRIME32_3))
                .rotate_left(17)
                .wrapping_mul(PRIME32_4);
            tail = &tail[4..];
        }
        for &byte in tail {
            hash = hash
                .wrapping_add(u32::from(byte).wrapping_mul(PRIME32_5))
                .rotate_left(11)
                .wrapping_mul(PRIME32_1);
        }

        hash ^= hash >> 15;
        hash = hash.wrapping_mul(PRIME32_2);
        hash ^= hash >> 13;
        hash = hash.wrapping_mul(PRIME32_3);
        hash ^= hash >> 16;
        hash.to_be_bytes().to_vec()
    }
}

pub struct XxHash32Algorithm;

impl HashAlgorithmImpl for XxHash32Algorithm {
    fn id(&self) -> &'static str {
        "xxHash32"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(XxHash32Hasher::new())
    }
}

const PRIME64_1: u64 = 0x9E37_79B1_85EB_CA87;
const PRIME64_2: u64 = 0xC2B2_AE3D_27D4_EB4F;
const PRIME64_3: u64 = 0x1656_67B1_9E37_79F9;
const PRIME64_4: u64 = 0x85EB_CA77_C2B2_AE63;
const PRIME64_5: u64 = 0x27D4_EB2F_1656_67C5;

struct XxHash64Hasher {
    acc: [u64; 4],
    buffer: [u8; 32],
    buffered: usize,
    total_len: u64,
}

impl XxHash64Hasher {
    fn new() -> Self {
        Self {
            acc: [
                PRIME64_1.wrapping_add(PRIME64_2),
                PRIME64_2,
                0,
                0u64.wrapping_sub(PRIME64_1),
            ],
            buffer: [0; 32],
            buffered: 0,
            total_len: 0,
        }
    }

    fn round(acc: u64, lane: u64) -> u64 {
        acc.wrapping_add(lane.wrapping_mul(PRIME64_2))
            .rotate_left(31)
            .wrapping_mul(PRIME64_1)
    }

    fn merge_round(hash: u64, acc: u64) -> u64 {
        (hash ^ Self::round(0, acc))
            .wrapping_mul(PRIME64_1)
            .wrapping_add(PRIME64_4)
    }

    fn consume_stripe(&mut self, stripe: &[u8]) {
        for (index, lane) in stripe.chunks_exact(8).enumerate() {
            let lane = u64::from_le_bytes(lane.try_into().unwrap());
            self.acc[index] = Self::round(self.acc[index], lane);
        }
    }
}

impl StreamingHasher for XxHash64Hasher {
    fn update(&mut self, mut data: &[u8]) {
        self.total_len += data.len() as u64;

        if self.buffered > 0 {
            let take = (32 - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < 32 {
                return;
            }
            let stripe = self.buffer;
            self.consume_stripe(&stripe);
            self.buffered = 0;
        }

        while data.len() >= 32 {
            let (stripe, rest) = data.split_at(32);
            self.consume_stripe(stripe);
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let mut hash = if self.total_len >= 32 {
            let mut hash = self.acc[0]
                .rotate_left(1)
                .wrapping_add(self.acc[1].rotate_left(7))
                .wrapping_add(self.acc[2].rotate_left(12))
                .wrapping_add(self.acc[3].rotate_left(18));
            for acc in self.acc {
                hash = Self::merge_round(hash, acc);
            }
            hash
        } else {
            PRIME64_5
        };

        hash = hash.wrapping_add(self.total_len);

        let mut tail = &self.buffer[..self.buffered];
        while tail.len() >= 8 {
            let lane = u64::from_le_bytes(tail[..8].try_into().unwrap());
            hash = (hash ^ Self::round(0, lane))
                .rotate_left(27)
                .wrapping_mul(PRIME64_1)
                .wrapping_add(PRIME64_4);
            tail = &tail[8..];
        }
        if tail.len() >= 4 {
            let lane = u64::from(u32::from_le_bytes(tail[..4].try_into().unwrap()));
            hash = (hash ^ lane.wrapping_mul(PRIME64_1))
                .rotate_left(23)
                .wrapping_mul(PRIME64_2)
                .wrapping_add(PRIME64_3);
            tail = &tail[4..];
        }
        for &byte in tail {
            hash = (hash ^ u64::from(byte).wrapping_mul(PRIME64_5))
                .rotate_left(11)
                .wrapping_mul(PRIME64_1);
        }

        hash ^= hash >> 33;
        hash = hash.wrapping_mul(PRIME64_2);
        hash ^= hash >> 29;
        hash = hash.wrapping_mul(PRIME64_3);
        hash ^= hash >> 32;
        hash.to_be_bytes().to_vec()
    }
}

pub struct XxHash64Algorithm;

impl HashAlgorithmImpl for XxHash64Algorithm {
    fn id(&self) -> &'static str {
        "xxHash64"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        64
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(XxHash64Hasher::new())
    }
}
