//! Performance benchmarks for the hash engines
//!
//! Measures the throughput of a representative cross-section of the
//! registered algorithms and the overhead of the streaming front end over
//! direct byte hashing.

use checksum_core::{AlgorithmRegistry, ChecksumCalculator};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tokio::runtime::Runtime;

const BENCH_ALGORITHMS: &[&str] = &[
    "SHA256",
    "MD5",
    "Blake2",
    "CRC",
    "FNV1a",
    "xxHash64",
    "MurmurHash3",
    "MetroHash64",
    "SpookyHashV2",
];

fn benchmark_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_algorithms");

    let sizes = vec![
        1_024,      // 1KB - small payloads
        102_400,    // 100KB - config and text files
        1_048_576,  // 1MB - documents
        10_485_760, // 10MB - media files
    ];

    for size in sizes {
        let data = generate_test_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for name in BENCH_ALGORITHMS {
            let algorithm = AlgorithmRegistry::global().resolve(name).unwrap();
            group.bench_with_input(
                BenchmarkId::new(*name, format_size(size)),
                &data,
                |b, data| {
                    b.iter(|| {
                        black_box(algorithm.hash_bytes(black_box(data)));
                    })
                },
            );
        }
    }

    group.finish();
}

fn benchmark_streaming_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_overhead");
    let rt = Runtime::new().unwrap();

    let size = 10_485_760; // 10MB
    let data = generate_test_data(size);
    group.throughput(Throughput::Bytes(size as u64));

    let calculator = ChecksumCalculator::with_algorithm("xxHash64").unwrap();

    // direct in-memory hashing as the baseline
    group.bench_function("in_memory", |b| {
        b.iter(|| {
            black_box(calculator.hash_bytes(black_box(&data)));
        })
    });

    // the chunked async file path on top of it
    group.bench_function("streaming_file", |b| {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("bench_10mb.bin");
        std::fs::write(&file_path, &data).unwrap();

        b.iter(|| {
            rt.block_on(async {
                let result = calculator.hash_file(black_box(&file_path)).await.unwrap();
                black_box(result.hash);
            });
        })
    });

    group.finish();
}

fn benchmark_reference_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_comparison");

    let data = generate_test_data(1_048_576);
    group.throughput(Throughput::Bytes(1_048_576));

    let crc = AlgorithmRegistry::global().resolve("CRC").unwrap();
    group.bench_function("table_driven_crc32", |b| {
        b.iter(|| {
            black_box(crc.hash_bytes(black_box(&data)));
        })
    });

    group.bench_function("crc32fast", |b| {
        b.iter(|| {
            let mut hasher = crc32fast::Hasher::new();
            hasher.update(black_box(&data));
            black_box(hasher.finalize());
        })
    });

    let xx = AlgorithmRegistry::global().resolve("xxHash64").unwrap();
    group.bench_function("native_xxhash64", |b| {
        b.iter(|| {
            black_box(xx.hash_bytes(black_box(&data)));
        })
    });

    group.bench_function("twox_hash_xxhash64", |b| {
        b.iter(|| {
            black_box(twox_hash::XxHash64::oneshot(0, black_box(&data)));
        })
    });

    group.finish();
}

// Helper functions

fn generate_test_data(size: usize) -> Vec<u8> {
    // Deterministic data for reproducible runs
    let mut data = Vec::with_capacity(size);
    let mut seed = 0x12345678u32;

    for _ in 0..size {
        data.push((seed & 0xFF) as u8);
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    }

    data
}

fn format_size(size: usize) -> String {
    if size >= 1_048_576 {
        format!("{}MB", size / 1_048_576)
    } else if size >= 1_024 {
        format!("{}KB", size / 1_024)
    } else {
        format!("{size}B")
    }
}

criterion_group!(
    benches,
    benchmark_hash_algorithms,
    benchmark_streaming_overhead,
    benchmark_reference_comparison
);

criterion_main!(benches);
