//! Bob Jenkins hashes
//!
//! `Jenkins1` is the one-at-a-time hash, `Jenkins2` is lookup2. lookup2
//! consumes 12-byte blocks eagerly, buffering at most 11 bytes, so chunk
//! boundaries never change the result.

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

#[derive(Default)]
struct OneAtATimeHasher {
    state: u32,
}

impl StreamingHasher for OneAtATimeHasher {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state = self.state.wrapping_add(u32::from(byte));
            self.state = self.state.wrapping_add(self.state << 10);
            self.state ^= self.state >> 6;
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let mut hash = self.state;
        hash = hash.wrapping_add(hash << 3);
        hash ^= hash >> 11;
        hash = hash.wrapping_add(hash << 15);
        hash.to_be_bytes().to_vec()
    }
}

pub struct Jenkins1Algorithm;

impl HashAlgorithmImpl for Jenkins1Algorithm {
    fn id(&self) -> &'static str {
        "Jenkins1"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(OneAtATimeHasher::default())
    }
}

const GOLDEN_RATIO: u32 = 0x9E37_79B9;

struct Lookup2Hasher {
    a: u32,
    b: u32,
    c: u32,
    buffer: [u8; 12],
    buffered: usize,
    total_len: u64,
}

impl Lookup2Hasher {
    fn new() -> Self {
        Self {
            a: GOLDEN_RATIO,
            b: GOLDEN_RATIO,
            c: 0,
            buffer: [0; 12],
            buffered: 0,
            total_len: 0,
        }
    }

    fn mix(&mut self) {
        let (mut a, mut b, mut c) = (self.a, self.b, self.c);
        a = a.wrapping_sub(b).wrapping_sub(c) ^ (c >> 13);
        b = b.wrapping_sub(c).wrapping_sub(a) ^ (a << 8);
        c = c.wrapping_sub(a).wrapping_sub(b) ^ (b >> 13);
        a = a.wrapping_sub(b).wrapping_sub(c) ^ (c >> 12);
        b = b.wrapping_sub(c).wrapping_sub(a) ^ (a << 16);
        c = c.wrapping_sub(a).wrapping_sub(b) ^ (b >> 5);
        a = a.wrapping_sub(b).wrapping_sub(c) ^ (c >> 3);
        b = b.wrapping_sub(c).wrapping_sub(a) ^ (a << 10);
        c = c.wrapping_sub(a).wrapping_sub(b) ^ (b >> 15);
        self.a = a;
        self.b = b;
        self.c = c;
    }

    fn consume_block(&mut self, block: &[u8]) {
        self.a = self
            .a
            .wrapping_add(u32::from_le_bytes(block[0..4].try_into().unwrap()));
        self.b = self
            .b
            .wrapping_add(u32::from_le_bytes(block[4..8].try_into().unwrap()));
        self.c = self
            .c
            .wrapping_add(u32::from_le_bytes(block[8..12].try_into().unwrap()));
        self.mix();
    }
}

impl StreamingHasher for Lookup2Hasher {
    fn update(&mut self, mut data: &[u8]) {
        self.total_len += data.len() as u64;

        if self.buffered > 0 {
            let take = (12 - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < 12 {
                return;
            }
            let block = self.buffer;
            self.consume_block(&block);
            self.buffered = 0;
        }

        while data.len() >= 12 {
            let (block, rest) = data.split_at(12);
            self.consume_block(block);
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    fn finalize(mut self: Box<Self>) -> Vec<u8> {
        self.c = self.c.wrapping_add(self.total_len as u32);

        // the low byte of c is reserved for the length
        let tail = self.buffer;
        for position in (0..self.buffered).rev() {
            let byte = u32::from(tail[position]);
            match position {
                0..=3 => self.a = self.a.wrapping_add(byte << (8 * position)),
                4..=7 => self.b = self.b.wrapping_add(byte << (8 * (position - 4))),
                _ => self.c = self.c.wrapping_add(byte << (8 * (position - 7))),
            }
        }

        self.mix();
        self.c.to_be_bytes().to_vec()
    }
}

pub struct Jenkins2Algorithm;

impl HashAlgorithmImpl for Jenkins2Algorithm {
    fn id(&self) -> &'static str {
        "Jenkins2"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Lookup2Hasher::new())
    }
}
