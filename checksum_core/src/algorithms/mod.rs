//! Hash algorithm implementations

use super::registry::AlgorithmRegistry;

mod bernstein;
mod buzhash;
mod crc;
mod digest;
mod elf64;
mod fnv;
mod jenkins;
mod metro;
mod murmur3;
mod pearson;
mod spooky;
mod xxhash;

pub use crc::CrcParams;

/// Register all built-in algorithms with the registry
pub(crate) fn register_all(registry: &mut AlgorithmRegistry) {
    registry.register(Box::new(digest::Md5Algorithm));
    registry.register(Box::new(digest::Sha1Algorithm));
    registry.register(Box::new(digest::Sha256Algorithm));
    registry.register(Box::new(digest::Sha384Algorithm));
    registry.register(Box::new(digest::Sha512Algorithm));
    registry.register(Box::new(digest::Blake2Algorithm));
    registry.register(Box::new(bernstein::BernsteinAlgorithm));
    registry.register(Box::new(bernstein::ModifiedBernsteinAlgorithm));
    registry.register(Box::new(buzhash::BuzhashAlgorithm));
    registry.register(Box::new(crc::CrcAlgorithm::default()));
    registry.register(Box::new(elf64::Elf64Algorithm));
    registry.register(Box::new(fnv::Fnv1Algorithm));
    registry.register(Box::new(fnv::Fnv1aAlgorithm));
    registry.register(Box::new(jenkins::Jenkins1Algorithm));
    registry.register(Box::new(jenkins::Jenkins2Algorithm));
    registry.register(Box::new(murmur3::Murmur3Algorithm));
    registry.register(Box::new(pearson::PearsonAlgorithm));
    registry.register(Box::new(spooky::SpookyV1Algorithm));
    registry.register(Box::new(spooky::SpookyV2Algorithm));
    registry.register(Box::new(xxhash::XxHash32Algorithm));
    registry.register(Box::new(xxhash::XxHash64Algorithm));
    registry.register(Box::new(metro::MetroHash64Algorithm));
    registry.register(Box::new(metro::MetroHash128Algorithm));
}
