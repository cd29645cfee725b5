//! Performance benchmarks for the block cache.
//!
//! Compares the cache against going straight to the system allocator for
//! the same-size malloc/free churn that row operations produce.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gf2core::system::{mm_free, mm_malloc};
use gf2core::BlockCache;

fn bench_same_size_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("same_size_churn");

    for size in [64usize, 1024, 16 * 1024, 256 * 1024].iter() {
        let mut cache = BlockCache::new();

        group.bench_with_input(BenchmarkId::new("cache", size), size, |b, &size| {
            b.iter(|| {
                let block = cache.malloc(black_box(size)).unwrap();
                cache.free(black_box(block));
            });
        });

        group.bench_with_input(BenchmarkId::new("system", size), size, |b, &size| {
            b.iter(|| {
                let block = mm_malloc(black_box(size)).unwrap();
                mm_free(black_box(block));
            });
        });
    }
    group.finish();
}

fn bench_calloc(c: &mut Criterion) {
    let mut cache = BlockCache::new();

    c.bench_function("calloc_4096", |b| {
        b.iter(|| {
            let block = cache.calloc(black_box(64), black_box(64)).unwrap();
            cache.free(block);
        });
    });
}

fn bench_eviction(c: &mut Criterion) {
    let mut cache = BlockCache::new();

    // More distinct sizes than slots: every free past the 16th evicts.
    c.bench_function("eviction_round_robin", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let size = 64 * (1 + i % 32);
            let block = cache.malloc(size).unwrap();
            cache.free(block);
            cache.free(mm_malloc(size + 8).unwrap());
            i += 1;
        });
    });
}

criterion_group!(benches, bench_same_size_churn, bench_calloc, bench_eviction);
criterion_main!(benches);
