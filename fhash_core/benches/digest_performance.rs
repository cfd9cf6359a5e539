//! Performance benchmarks for multi-algorithm digests
//!
//! Measures the cost of feeding every catalog algorithm in one pass, the
//! effect of the read size on file digests, and the per-file overhead of a
//! directory walk.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fhash_core::{AlgorithmSet, Digester, ExcludedExtensions, HashAlgorithm, format_size};
use std::hint::black_box;
use tempfile::TempDir;

/// Full catalog against a single algorithm over in-memory data
fn benchmark_catalog_vs_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_vs_single");

    let full = Digester::new();
    let single = Digester::new().with_algorithms(
        AlgorithmSet::from_algorithms([HashAlgorithm::Sha256]).unwrap(),
    );

    for size in [1_024usize, 102_400, 1_048_576, 10_485_760] {
        let data = generate_test_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::new("all_11", format_size(size as u64)),
            &data,
            |b, data| b.iter(|| black_box(full.digest_bytes(black_box(data)))),
        );

        group.bench_with_input(
            BenchmarkId::new("sha256_only", format_size(size as u64)),
            &data,
            |b, data| b.iter(|| black_box(single.digest_bytes(black_box(data)))),
        );
    }

    group.finish();
}

/// Read size against a 16MB file
fn benchmark_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_chunk_size");
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("evidence.bin");
    let size = 16 * 1024 * 1024;
    std::fs::write(&path, generate_test_data(size)).unwrap();

    group.throughput(Throughput::Bytes(size as u64));
    group.sample_size(10);

    for chunk_size in [4_096usize, 8_192, 65_536, 1_048_576] {
        let digester = Digester::new().with_chunk_size(chunk_size).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &path,
            |b, path| b.iter(|| black_box(digester.digest_file(path).unwrap())),
        );
    }

    group.finish();
}

/// Many small files in a shallow tree
fn benchmark_tree_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_walk");
    let temp_dir = TempDir::new().unwrap();

    for dir in 0..10 {
        let sub = temp_dir.path().join(format!("dir_{dir:02}"));
        std::fs::create_dir_all(&sub).unwrap();
        for file in 0..50 {
            std::fs::write(sub.join(format!("file_{file:03}.dat")), generate_test_data(2_048)).unwrap();
        }
    }

    let digester = Digester::new();
    let excluded = ExcludedExtensions::none();
    group.bench_function("500_files_2KB", |b| {
        b.iter(|| black_box(digester.digest_tree(temp_dir.path(), &excluded).unwrap()))
    });

    group.finish();
}

fn generate_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

criterion_group!(
    benches,
    benchmark_catalog_vs_single,
    benchmark_chunk_sizes,
    benchmark_tree_walk
);
criterion_main!(benches);
