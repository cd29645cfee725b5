//! Tests for the process-wide block cache.
//!
//! All tests in this binary share one cache, so each takes `SERIAL` first.

use gf2core::global::{configure_global_cache, with_global_cache};
use gf2core::{cache_calloc, cache_cleanup, cache_free, cache_malloc, CacheConfig, MMC_THRESHOLD};
use parking_lot::Mutex;
use std::thread;

static SERIAL: Mutex<()> = parking_lot::const_mutex(());

fn reset() {
    cache_cleanup();
    with_global_cache(|cache| cache.reset_stats());
}

#[test]
fn test_global_round_trip() {
    let _guard = SERIAL.lock();
    reset();

    let block = cache_malloc(3000).unwrap();
    let addr = block.as_ptr();
    cache_free(block);

    let block = cache_malloc(3000).unwrap();
    assert_eq!(block.as_ptr(), addr);
    assert_eq!(with_global_cache(|cache| cache.stats().hits), 1);
    cache_free(block);
    reset();
}

#[test]
fn test_global_calloc_zeroed() {
    let _guard = SERIAL.lock();
    reset();

    let mut block = cache_malloc(1024).unwrap();
    block.fill(0x5A);
    cache_free(block);

    let block = cache_calloc(64, 16).unwrap();
    assert!(block.iter().all(|&b| b == 0));
    reset();
}

#[test]
fn test_global_cleanup_twice() {
    let _guard = SERIAL.lock();
    reset();

    for i in 1..=8 {
        cache_free(cache_malloc(i * 64).unwrap());
    }
    assert_eq!(with_global_cache(|cache| cache.len()), 8);

    cache_cleanup();
    cache_cleanup();
    assert!(with_global_cache(|cache| cache.is_empty()));
}

#[test]
fn test_global_reconfigure() {
    let _guard = SERIAL.lock();
    reset();

    cache_free(cache_malloc(2048).unwrap());
    configure_global_cache(CacheConfig::with_threshold(1024)).unwrap();
    assert!(with_global_cache(|cache| cache.is_empty()));

    cache_free(cache_malloc(2048).unwrap());
    assert!(with_global_cache(|cache| cache.is_empty()));

    configure_global_cache(CacheConfig::with_threshold(MMC_THRESHOLD)).unwrap();
    reset();
}

#[test]
fn test_global_cache_serializes_threads() {
    let _guard = SERIAL.lock();
    reset();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            thread::spawn(move || {
                for i in 0..500 {
                    let size = 64 * (1 + (t + i) % 8);
                    let mut block = cache_malloc(size).unwrap();
                    block.as_words_mut()[0] = t as u64;
                    assert_eq!(block.as_words()[0], t as u64);
                    cache_free(block);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let (len, stats) = with_global_cache(|cache| (cache.len(), cache.stats()));
    assert!(len <= gf2core::MMC_NBLOCKS);
    assert_eq!(stats.hits + stats.misses, 2000);
    reset();
}
