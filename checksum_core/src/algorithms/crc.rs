//! Table-driven cyclic redundancy check
//!
//! Parameterized over the usual CRC model (width, polynomial, initial value,
//! input/output reflection, final xor). The registered `CRC` algorithm uses
//! the CRC-32/ISO-HDLC model.

use crate::error::{Result, ValidationError};
use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

/// CRC model parameters
///
/// For reflected models the polynomial and initial value are given in
/// reflected bit order, as is conventional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrcParams {
    pub width: u32,
    pub poly: u64,
    pub init: u64,
    pub reflect_in: bool,
    pub reflect_out: bool,
    pub xor_out: u64,
}

/// CRC-32/ISO-HDLC, the ubiquitous zip/ethernet CRC
pub const CRC32: CrcParams = CrcParams {
    width: 32,
    poly: 0xEDB8_8320,
    init: 0xFFFF_FFFF,
    reflect_in: true,
    reflect_out: true,
    xor_out: 0xFFFF_FFFF,
};

impl CrcParams {
    /// Validate a custom model
    pub fn new(
        width: u32,
        poly: u64,
        init: u64,
        reflect_in: bool,
        reflect_out: bool,
        xor_out: u64,
    ) -> Result<Self> {
        if !(8..=64).contains(&width) {
            return Err(
                ValidationError::invalid_parameter("width", "must be between 8 and 64").into(),
            );
        }
        Ok(Self {
            width,
            poly,
            init,
            reflect_in,
            reflect_out,
            xor_out,
        })
    }

    fn mask(&self) -> u64 {
        if self.width == 64 {
            u64::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    fn build_table(&self) -> [u64; 256] {
        let mask = self.mask();
        let mut table = [0u64; 256];
        if self.reflect_in {
            for (index, entry) in table.iter_mut().enumerate() {
                let mut crc = index as u64;
                for _ in 0..8 {
                    crc = if crc & 1 != 0 {
                        (crc >> 1) ^ self.poly
                    } else {
                        crc >> 1
                    };
                }
                *entry = crc & mask;
            }
        } else {
            let top_bit = 1u64 << (self.width - 1);
            for (index, entry) in table.iter_mut().enumerate() {
                let mut crc = (index as u64) << (self.width - 8);
                for _ in 0..8 {
                    crc = if crc & top_bit != 0 {
                        (crc << 1) ^ self.poly
                    } else {
                        crc << 1
                    };
                }
                *entry = crc & mask;
            }
        }
        table
    }
}

fn reflect_bits(value: u64, width: u32) -> u64 {
    value.reverse_bits() >> (64 - width)
}

struct CrcHasher {
    params: CrcParams,
    table: [u64; 256],
    state: u64,
}

impl CrcHasher {
    fn new(params: CrcParams) -> Self {
        Self {
            table: params.build_table(),
            state: params.init & params.mask(),
            params,
        }
    }
}

impl StreamingHasher for CrcHasher {
    fn update(&mut self, data: &[u8]) {
        let mask = self.params.mask();
        if self.params.reflect_in {
            for &byte in data {
                let index = ((self.state ^ u64::from(byte)) & 0xFF) as usize;
                self.state = self.table[index] ^ (self.state >> 8);
            }
        } else {
            let shift = self.params.width - 8;
            for &byte in data {
                let index = (((self.state >> shift) ^ u64::from(byte)) & 0xFF) as usize;
                self.state = (self.table[index] ^ (self.state << 8)) & mask;
            }
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let mut value = self.state;
        if self.params.reflect_in != self.params.reflect_out {
            value = reflect_bits(value, self.params.width);
        }
        value = (value ^ self.params.xor_out) & self.params.mask();

        let bytes = self.params.width.div_ceil(8) as usize;
        value.to_be_bytes()[8 - bytes..].to_vec()
    }
}

pub struct CrcAlgorithm {
    params: CrcParams,
}

impl Default for CrcAlgorithm {
    fn default() -> Self {
        Self { params: CRC32 }
    }
}

impl HashAlgorithmImpl for CrcAlgorithm {
    fn id(&self) -> &'static str {
        "CRC"
    }

    fn family(&self) -> Family {
        Family::NonCryptographic
    }

    fn output_bits(&self) -> usize {
        (self.params.width.div_ceil(8) * 8) as usize
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(CrcHasher::new(self.params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crc32_value(data: &[u8]) -> u32 {
        let algorithm = CrcAlgorithm::default();
        u32::from_be_bytes(algorithm.hash_bytes(data).try_into().unwrap())
    }

    #[test]
    fn test_crc32_check_value() {
        assert_eq!(crc32_value(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_crc32_empty() {
        assert_eq!(crc32_value(b""), 0);
    }

    #[test]
    fn test_crc32_matches_reference_implementation() {
        for data in [
            &b"hello world"[..],
            &[0u8; 300][..],
            &[0xFFu8; 33][..],
            b"The quick brown fox jumps over the lazy dog",
        ] {
            let mut reference = crc32fast::Hasher::new();
            reference.update(data);
            assert_eq!(crc32_value(data), reference.finalize());
        }
    }

    #[test]
    fn test_non_reflected_model() {
        // CRC-16/XMODEM: width 16, poly 0x1021, init 0, no reflection
        let params = CrcParams::new(16, 0x1021, 0, false, false, 0).unwrap();
        let mut hasher = Box::new(CrcHasher::new(params));
        hasher.update(b"123456789");
        assert_eq!(hasher.finalize(), vec![0x31, 0xC3]);
    }

    #[test]
    fn test_invalid_width_rejected() {
        assert!(CrcParams::new(4, 0x3, 0, false, false, 0).is_err());
        assert!(CrcParams::new(65, 0x3, 0, false, false, 0).is_err());
    }

    #[test]
    fn test_chunked_update_matches_oneshot() {
        let algorithm = CrcAlgorithm::default();
        let mut hasher = algorithm.create_hasher();
        hasher.update(b"12345");
        hasher.update(b"6789");
        assert_eq!(hasher.finalize(), algorithm.hash_bytes(b"123456789"));
    }
}
