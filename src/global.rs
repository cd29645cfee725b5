//! Process-wide block cache.
//!
//! Matrix code that does not want to thread a [`BlockCache`] through every
//! call can use these free functions instead. They share one cache guarded
//! by a `parking_lot::Mutex`, so concurrent callers are serialized rather
//! than racing on the slot array.
//!
//! Call [`cache_cleanup`] at teardown to hand the cached blocks back to the
//! system; it is safe to call more than once.

use crate::block::Block;
use crate::cache::BlockCache;
use crate::config::CacheConfig;
use crate::error::Result;
use parking_lot::{const_mutex, Mutex};

static GLOBAL_CACHE: Mutex<BlockCache> = const_mutex(BlockCache::new());

/// Get a block of `size` bytes from the process-wide cache.
pub fn cache_malloc(size: usize) -> Result<Block> {
    GLOBAL_CACHE.lock().malloc(size)
}

/// Get a zeroed block of `size * count` bytes from the process-wide cache.
pub fn cache_calloc(size: usize, count: usize) -> Result<Block> {
    GLOBAL_CACHE.lock().calloc(size, count)
}

/// Return a block to the process-wide cache.
pub fn cache_free(block: Block) {
    GLOBAL_CACHE.lock().free(block);
}

/// Release every block held by the process-wide cache.
pub fn cache_cleanup() {
    GLOBAL_CACHE.lock().cleanup();
}

/// Replace the process-wide cache configuration.
pub fn configure_global_cache(config: CacheConfig) -> Result<()> {
    GLOBAL_CACHE.lock().reconfigure(config)
}

/// Run `f` with exclusive access to the process-wide cache.
///
/// Useful for inspecting [`BlockCache::stats`] or doing several operations
/// under one lock.
pub fn with_global_cache<R>(f: impl FnOnce(&mut BlockCache) -> R) -> R {
    f(&mut GLOBAL_CACHE.lock())
}
