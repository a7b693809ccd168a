//! PJW hash as used by the ELF object format

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

#[derive(Default)]
struct Elf64Hasher {
    state: u32,
}

impl StreamingHasher for Elf64Hasher {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state = (self.state << 4).wrapping_add(u32::from(byte));
            let high = self.state & 0xF000_0000;
            if high != 0 {
                self.state ^= high >> 24;
            }
            self.state &= !high;
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.state.to_be_bytes().to_vec()
    }
}

pub struct Elf64Algorithm;

impl HashAlgorithmImpl for Elf64Algorithm {
    fn id(&self) -> &'static str {
        "ELF64"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Elf64Hasher::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(data: &[u8]) -> u32 {
        u32::from_be_bytes(Elf64Algorithm.hash_bytes(data).try_into().unwrap())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(value(b""), 0);
    }

    #[test]
    fn test_single_byte() {
        // one shift round leaves the byte itself
        assert_eq!(value(b"a"), 0x61);
    }

    #[test]
    fn test_state_stays_in_28_bits() {
        // the high nibble is cleared after every byte
        for data in [&b"abcdefgh"[..], &[0xFF; 64][..]] {
            assert_eq!(value(data) & 0xF000_0000, 0);
        }
    }

    #[test]
    fn test_chunked_update_matches_oneshot() {
        let mut hasher = Elf64Algorithm.create_hasher();
        hasher.update(b"/usr/lib/lib");
        hasher.update(b"c.so.6");
        assert_eq!(
            hasher.finalize(),
            Elf64Algorithm.hash_bytes(b"/usr/lib/libc.so.6")
        );
    }
}
