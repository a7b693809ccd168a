//! SpookyHash versions 1 and 2, 128-bit output, seed 0
//!
//! Inputs shorter than 192 bytes take a four-variable short path; longer
//! streams run twelve accumulators over 96-byte blocks. The two versions
//! share the mixing schedules and differ in how the length and the final
//! partial block are folded in: V2 mixes the length into the short path and
//! adds the padded final block during the long finish, V1 runs the padded
//! block through a full mix round instead.

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

const SC_CONST: u64 = 0xDEAD_BEEF_DEAD_BEEF;
const NUM_VARS: usize = 12;
const BLOCK_SIZE: usize = NUM_VARS * 8;
const BUF_SIZE: usize = 2 * BLOCK_SIZE;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Version {
    V1,
    V2,
}

fn read_u64(data: &[u8]) -> u64 {
    u64::from_le_bytes(data[..8].try_into().unwrap())
}

fn block_words(block: &[u8; BLOCK_SIZE]) -> [u64; NUM_VARS] {
    let mut words = [0u64; NUM_VARS];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(8)) {
        *word = read_u64(chunk);
    }
    words
}

#[rustfmt::skip]
fn mix(h: &mut [u64; NUM_VARS], data: &[u64; NUM_VARS]) {
    h[0] = h[0].wrapping_add(data[0]);  h[2] ^= h[10]; h[11] ^= h[0];  h[0] = h[0].rotate_left(11);  h[11] = h[11].wrapping_add(h[1]);
    h[1] = h[1].wrapping_add(data[1]);  h[3] ^= h[11]; h[0] ^= h[1];   h[1] = h[1].rotate_left(32);  h[0] = h[0].wrapping_add(h[2]);
    h[2] = h[2].wrapping_add(data[2]);  h[4] ^= h[0];  h[1] ^= h[2];   h[2] = h[2].rotate_left(43);  h[1] = h[1].wrapping_add(h[3]);
    h[3] = h[3].wrapping_add(data[3]);  h[5] ^= h[1];  h[2] ^= h[3];   h[3] = h[3].rotate_left(31);  h[2] = h[2].wrapping_add(h[4]);
    h[4] = h[4].wrapping_add(data[4]);  h[6] ^= h[2];  h[3] ^= h[4];   h[4] = h[4].rotate_left(17);  h[3] = h[3].wrapping_add(h[5]);
    h[5] = h[5].wrapping_add(data[5]);  h[7] ^= h[3];  h[4] ^= h[5];   h[5] = h[5].rotate_left(28);  h[4] = h[4].wrapping_add(h[6]);
    h[6] = h[6].wrapping_add(data[6]);  h[8] ^= h[4];  h[5] ^= h[6];   h[6] = h[6].rotate_left(39);  h[5] = h[5].wrapping_add(h[7]);
    h[7] = h[7].wrapping_add(data[7]);  h[9] ^= h[5];  h[6] ^= h[7];   h[7] = h[7].rotate_left(57);  h[6] = h[6].wrapping_add(h[8]);
    h[8] = h[8].wrapping_add(data[8]);  h[10] ^= h[6]; h[7] ^= h[8];   h[8] = h[8].rotate_left(55);  h[7] = h[7].wrapping_add(h[9]);
    h[9] = h[9].wrapping_add(data[9]);  h[11] ^= h[7]; h[8] ^= h[9];   h[9] = h[9].rotate_left(54);  h[8] = h[8].wrapping_add(h[10]);
    h[10] = h[10].wrapping_add(data[10]); h[0] ^= h[8]; h[9] ^= h[10]; h[10] = h[10].rotate_left(22); h[9] = h[9].wrapping_add(h[11]);
    h[11] = h[11].wrapping_add(data[11]); h[1] ^= h[9]; h[10] ^= h[11]; h[11] = h[11].rotate_left(46); h[10] = h[10].wrapping_add(h[0]);
}

#[rustfmt::skip]
fn end_partial(h: &mut [u64; NUM_VARS]) {
    h[11] = h[11].wrapping_add(h[1]); h[2] ^= h[11]; h[1] = h[1].rotate_left(44);
    h[0] = h[0].wrapping_add(h[2]);   h[3] ^= h[0];  h[2] = h[2].rotate_left(15);
    h[1] = h[1].wrapping_add(h[3]);   h[4] ^= h[1];  h[3] = h[3].rotate_left(34);
    h[2] = h[2].wrapping_add(h[4]);   h[5] ^= h[2];  h[4] = h[4].rotate_left(21);
    h[3] = h[3].wrapping_add(h[5]);   h[6] ^= h[3];  h[5] = h[5].rotate_left(38);
    h[4] = h[4].wrapping_add(h[6]);   h[7] ^= h[4];  h[6] = h[6].rotate_left(33);
    h[5] = h[5].wrapping_add(h[7]);   h[8] ^= h[5];  h[7] = h[7].rotate_left(10);
    h[6] = h[6].wrapping_add(h[8]);   h[9] ^= h[6];  h[8] = h[8].rotate_left(13);
    h[7] = h[7].wrapping_add(h[9]);   h[10] ^= h[7]; h[9] = h[9].rotate_left(38);
    h[8] = h[8].wrapping_add(h[10]);  h[11] ^= h[8]; h[10] = h[10].rotate_left(53);
    h[9] = h[9].wrapping_add(h[11]);  h[0] ^= h[9];  h[11] = h[11].rotate_left(42);
    h[10] = h[10].wrapping_add(h[0]); h[1] ^= h[10]; h[0] = h[0].rotate_left(54);
}

#[rustfmt::skip]
fn short_mix(a: &mut u64, b: &mut u64, c: &mut u64, d: &mut u64) {
    *c = c.rotate_left(50); *c = c.wrapping_add(*d); *a ^= *c;
    *d = d.rotate_left(52); *d = d.wrapping_add(*a); *b ^= *d;
    *a = a.rotate_left(30); *a = a.wrapping_add(*b); *c ^= *a;
    *b = b.rotate_left(41); *b = b.wrapping_add(*c); *d ^= *b;
    *c = c.rotate_left(54); *c = c.wrapping_add(*d); *a ^= *c;
    *d = d.rotate_left(48); *d = d.wrapping_add(*a); *b ^= *d;
    *a = a.rotate_left(38); *a = a.wrapping_add(*b); *c ^= *a;
    *b = b.rotate_left(37); *b = b.wrapping_add(*c); *d ^= *b;
    *c = c.rotate_left(62); *c = c.wrapping_add(*d); *a ^= *c;
    *d = d.rotate_left(34); *d = d.wrapping_add(*a); *b ^= *d;
    *a = a.rotate_left(5);  *a = a.wrapping_add(*b); *c ^= *a;
    *b = b.rotate_left(36); *b = b.wrapping_add(*c); *d ^= *b;
}

#[rustfmt::skip]
fn short_end(a: &mut u64, b: &mut u64, c: &mut u64, d: &mut u64) {
    *d ^= *c; *c = c.rotate_left(15); *d = d.wrapping_add(*c);
    *a ^= *d; *d = d.rotate_left(52); *a = a.wrapping_add(*d);
    *b ^= *a; *a = a.rotate_left(26); *b = b.wrapping_add(*a);
    *c ^= *b; *b = b.rotate_left(51); *c = c.wrapping_add(*b);
    *d ^= *c; *c = c.rotate_left(28); *d = d.wrapping_add(*c);
    *a ^= *d; *d = d.rotate_left(9);  *a = a.wrapping_add(*d);
    *b ^= *a; *a = a.rotate_left(47); *b = b.wrapping_add(*a);
    *c ^= *b; *b = b.rotate_left(54); *c = c.wrapping_add(*b);
    *d ^= *c; *c = c.rotate_left(32); *d = d.wrapping_add(*c);
    *a ^= *d; *d = d.rotate_left(25); *a = a.wrapping_add(*d);
    *b ^= *a; *a = a.rotate_left(63); *b = b.wrapping_add(*a);
}

struct SpookyHasher {
    version: Version,
    state: [u64; NUM_VARS],
    buffer: [u8; BUF_SIZE],
    buffered: usize,
    total_len: u64,
    long_mode: bool,
}

impl SpookyHasher {
    fn new(version: Version) -> Self {
        Self {
            version,
            state: [0; NUM_VARS],
            buffer: [0; BUF_SIZE],
            buffered: 0,
            total_len: 0,
            long_mode: false,
        }
    }

    fn enter_long_mode(&mut self) {
        self.long_mode = true;
        self.state = [
            0, 0, SC_CONST, 0, 0, SC_CONST, 0, 0, SC_CONST, 0, 0, SC_CONST,
        ];

        let pending = self.buffer;
        let pending_len = self.buffered;
        self.buffered = 0;
        self.feed_blocks(&pending[..pending_len]);
    }

    fn feed_blocks(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < BLOCK_SIZE {
                return;
            }
            let block: [u8; BLOCK_SIZE] = self.buffer[..BLOCK_SIZE].try_into().unwrap();
            mix(&mut self.state, &block_words(&block));
            self.buffered = 0;
        }

        while data.len() >= BLOCK_SIZE {
            let (block, rest) = data.split_at(BLOCK_SIZE);
            mix(&mut self.state, &block_words(block.try_into().unwrap()));
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    fn finalize_short(&self) -> (u64, u64) {
        let data = &self.buffer[..self.buffered];
        let mut a = 0u64;
        let mut b = 0u64;
        let mut c = SC_CONST;
        let mut d = SC_CONST;

        let mut chunks = data.chunks_exact(32);
        for chunk in &mut chunks {
            c = c.wrapping_add(read_u64(&chunk[0..]));
            d = d.wrapping_add(read_u64(&chunk[8..]));
            short_mix(&mut a, &mut b, &mut c, &mut d);
            a = a.wrapping_add(read_u64(&chunk[16..]));
            b = b.wrapping_add(read_u64(&chunk[24..]));
        }

        let mut remainder = chunks.remainder();
        if remainder.len() >= 16 {
            c = c.wrapping_add(read_u64(&remainder[0..]));
            d = d.wrapping_add(read_u64(&remainder[8..]));
            short_mix(&mut a, &mut b, &mut c, &mut d);
            remainder = &remainder[16..];
        }

        if self.version == Version::V2 {
            d = d.wrapping_add(self.total_len << 56);
        }

        match remainder.len() {
            0 => {
                c = c.wrapping_add(SC_CONST);
                d = d.wrapping_add(SC_CONST);
            }
            len if len >= 8 => {
                c = c.wrapping_add(read_u64(remainder));
                for (offset, &byte) in remainder[8..].iter().enumerate() {
                    d = d.wrapping_add(u64::from(byte) << (8 * offset));
                }
            }
            _ => {
                for (offset, &byte) in remainder.iter().enumerate() {
                    c = c.wrapping_add(u64::from(byte) << (8 * offset));
                }
            }
        }

        short_end(&mut a, &mut b, &mut c, &mut d);
        (a, b)
    }

    fn finalize_long(&self) -> (u64, u64) {
        let mut h = self.state;

        let mut block = [0u8; BLOCK_SIZE];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[BLOCK_SIZE - 1] = self.buffered as u8;
        let words = block_words(&block);

        match self.version {
            Version::V1 => mix(&mut h, &words),
            Version::V2 => {
                for (state, word) in h.iter_mut().zip(words) {
                    *state = state.wrapping_add(word);
                }
            }
        }

        end_partial(&mut h);
        end_partial(&mut h);
        end_partial(&mut h);
        (h[0], h[1])
    }
}

impl StreamingHasher for SpookyHasher {
    fn update(&mut self, data: &[u8]) {
        self.total_len += data.len() as u64;

        if !self.long_mode {
            if self.buffered + data.len() < BUF_SIZE {
                self.buffer[self.buffered..self.buffered + data.len()].copy_from_slice(data);
                self.buffered += data.len();
                return;
            }
            self.enter_long_mode();
        }

        self.feed_blocks(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let (h0, h1) = if self.long_mode {
            self.finalize_long()
        } else {
            self.finalize_short()
        };

        let mut digest = Vec::with_capacity(16);
        digest.extend_from_slice(&h0.to_be_bytes());
        digest.extend_from_slice(&h1.to_be_bytes());
        digest
    }
}

pub struct SpookyV1Algorithm;

impl HashAlgorithmImpl for SpookyV1Algorithm {
    fn id(&self) -> &'static str {
        "SpookyHashV1"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        128
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(SpookyHasher::new(Version::V1))
    }
}

pub struct SpookyV2Algorithm;

impl HashAlgorithmImpl for SpookyV2Algorithm {
    fn id(&self) -> &'static str {
        "SpookyHashV2"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        128
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(SpookyHasher::new(Version::V2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|index| (index * 131 % 251) as u8).collect()
    }

    fn hex_digest(algorithm: &dyn HashAlgorithmImpl, data: &[u8]) -> String {
        hex::encode_upper(algorithm.hash_bytes(data))
    }

    #[test]
    fn test_output_width() {
        assert_eq!(SpookyV1Algorithm.hash_bytes(b"").len(), 16);
        assert_eq!(SpookyV2Algorithm.hash_bytes(b"").len(), 16);
    }

    #[test]
    fn test_empty_input_digest() {
        // the length fold is the only V1/V2 difference on the short path,
        // so the empty input hashes identically under both
        for algorithm in [
            &SpookyV1Algorithm as &dyn HashAlgorithmImpl,
            &SpookyV2Algorithm,
        ] {
            assert_eq!(
                hex_digest(algorithm, b""),
                "232706FC6BF509198B72EE65B4E851C7"
            );
        }
    }

    #[test]
    fn test_v1_reference_digests() {
        let cases: &[(usize, &str)] = &[
            (1, "BB23A186FD4BB23F97EA19629C4D2BD3"),
            (25, "01A846721E9C1FF3E8BC9C0D320D4447"),
            (48, "230F3C5C9A01B6C92A77EF9FE420E503"),
            (96, "A3C425B4E988C46D3191037C83704611"),
            (191, "FDDFACFA5B0AAC3FB877B7F5C41D30C1"),
            (192, "F37D47474E16E5CF9960C1829BFF456E"),
            (289, "1FE8242694662566F4D4C3B1CB8FE59B"),
        ];
        for &(len, expected) in cases {
            assert_eq!(
                hex_digest(&SpookyV1Algorithm, &sample(len)),
                expected,
                "len {len}"
            );
        }
    }

    #[test]
    fn test_v2_reference_digests() {
        let cases: &[(usize, &str)] = &[
            (1, "1A108191A0BBC9BD754258F061412A92"),
            (25, "3E2D02F59ABA078716D151709D936A81"),
            (48, "10F34362E4BAD7A30BFA69D31C3B7DDE"),
            (96, "AE476080C798FD7F31D8B6A94D9C2587"),
            (191, "5988715FDF1850D7D9B830582E2134BD"),
            (192, "B665C464F4524ACA8DF6C9DFBC7A5F66"),
            (289, "D3FA85088F6332A690B98F7988AE086A"),
        ];
        for &(len, expected) in cases {
            assert_eq!(
                hex_digest(&SpookyV2Algorithm, &sample(len)),
                expected,
                "len {len}"
            );
        }
    }

    #[test]
    fn test_v2_short_ascii_digests() {
        assert_eq!(
            hex_digest(&SpookyV2Algorithm, b"Spooky"),
            "E9EDF70ED32EE9374E5CEB62A91AB1EF"
        );
        assert_eq!(
            hex_digest(&SpookyV2Algorithm, b"0123456789abcdef"),
            "E2D06846964B80AD6005068AC75C4C20"
        );
    }

    #[test]
    fn test_short_long_threshold() {
        // lengths straddling the 192-byte switch
        for len in [190, 191, 192, 193, 287, 288, 289] {
            let data = sample(len);
            let oneshot = SpookyV2Algorithm.hash_bytes(&data);

            let mut hasher = SpookyV2Algorithm.create_hasher();
            for chunk in data.chunks(37) {
                hasher.update(chunk);
            }
            assert_eq!(hasher.finalize(), oneshot, "len {len}");
        }
    }

    #[test]
    fn test_chunked_update_matches_oneshot() {
        let data = sample(1000);
        for chunk_size in [1, 31, 96, 97, 192, 500] {
            for algorithm in [
                &SpookyV1Algorithm as &dyn HashAlgorithmImpl,
                &SpookyV2Algorithm,
            ] {
                let mut hasher = algorithm.create_hasher();
                for chunk in data.chunks(chunk_size) {
                    hasher.update(chunk);
                }
                assert_eq!(
                    hasher.finalize(),
                    algorithm.hash_bytes(&data),
                    "chunk {chunk_size}"
                );
            }
        }
    }

    #[test]
    fn test_length_sensitivity() {
        assert_ne!(
            SpookyV2Algorithm.hash_bytes(&sample(100)),
            SpookyV2Algorithm.hash_bytes(&{
                let mut padded = sample(100);
                padded.push(0);
                padded
            })
        );
    }
}
