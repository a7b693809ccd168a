//! Cryptographic digest algorithms backed by the RustCrypto crates

use blake2::Blake2b512;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::traits::{Family, HashAlgorithmImpl, StreamingHasher};

/// Streaming adapter over any RustCrypto digest
struct DigestStreamingHasher<D: Digest + Send> {
    hasher: D,
}

impl<D: Digest + Send> DigestStreamingHasher<D> {
    fn new() -> Self {
        Self { hasher: D::new() }
    }
}

impl<D: Digest + Send> StreamingHasher for DigestStreamingHasher<D> {
    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.hasher.finalize().to_vec()
    }
}

macro_rules! digest_algorithm {
    ($algorithm:ident, $id:literal, $bits:literal, $backend:ty) => {
        pub struct $algorithm;

        impl HashAlgorithmImpl for $algorithm {
            fn id(&self) -> &'static str {
                $id
            }

            fn family(&self) -> Family {
                Family::Cryptographic
            }

            fn output_bits(&self) -> usize {
                $bits
            }

            fn create_hasher(&self) -> Box<dyn StreamingHasher> {
                Box::new(DigestStreamingHasher::<$backend>::new())
            }
        }
    };
}

digest_algorithm!(Md5Algorithm, "MD5", 128, Md5);
digest_algorithm!(Sha1Algorithm, "SHA1", 160, Sha1);
digest_algorithm!(Sha256Algorithm, "SHA256", 256, Sha256);
digest_algorithm!(Sha384Algorithm, "SHA384", 384, Sha384);
digest_algorithm!(Sha512Algorithm, "SHA512", 512, Sha512);
digest_algorithm!(Blake2Algorithm, "Blake2", 512, Blake2b512);
