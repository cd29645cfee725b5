//! BlockCache - Bounded exact-size cache of freed blocks.
//!
//! Row-oriented matrix code allocates and frees many buffers of the same
//! size in quick succession. `BlockCache` keeps up to [`MMC_NBLOCKS`]
//! recently freed blocks and hands them back when a request of exactly the
//! same size arrives, so those bursts never reach the system allocator.
//!
//! # Slot lifecycle
//!
//! ```text
//!   Empty ──free(block)──▶ Occupied ──malloc(same size)──▶ Empty
//!                            │  ▲
//!                            └──┘ evicted and replaced when every slot is full
//! ```
//!
//! # Policy
//!
//! - Lookup is an exact size match over a linear scan; no best fit, no
//!   splitting or coalescing
//! - `malloc` consults the cache for `size <= threshold`; `free` keeps blocks
//!   with `size < threshold`
//! - When all slots are occupied, the block under the eviction cursor is
//!   released to the system and replaced. The cursor then advances by one
//!   (mod 16) regardless of which slots were hit or filled since, so the
//!   victim order is round robin, not LRU
//! - Cached blocks are returned as-is: callers must not assume zeroed memory
//!   from [`BlockCache::malloc`]; [`BlockCache::calloc`] always zero-fills
//!
//! # Thread safety
//!
//! A `BlockCache` is a plain value with `&mut self` operations. Share it the
//! way you would share any other mutable state, or use the process-wide
//! cache in [`crate::global`], which sits behind a mutex.
//!
//! # Examples
//!
//! ```
//! use gf2core::BlockCache;
//!
//! let mut cache = BlockCache::with_threshold(4096);
//!
//! let row = cache.malloc(512).unwrap();
//! let addr = row.as_ptr();
//! cache.free(row);
//!
//! let again = cache.malloc(512).unwrap();
//! assert_eq!(again.as_ptr(), addr);
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::block::Block;
use crate::config::{CacheConfig, MMC_NBLOCKS, MMC_THRESHOLD};
use crate::error::Result;
use crate::system;
use serde::{Deserialize, Serialize};

const EMPTY_SLOT: Option<Block> = None;

/// Counters describing how the cache has been used.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// `malloc` calls served from a slot.
    pub hits: u64,
    /// `malloc` calls within the threshold that found no matching slot.
    pub misses: u64,
    /// `malloc` calls above the threshold.
    pub bypassed_allocs: u64,
    /// `free` calls that went straight to the system: zero-size blocks and
    /// blocks at or above the threshold.
    pub bypassed_frees: u64,
    /// Blocks placed into a slot.
    pub insertions: u64,
    /// Cached blocks released before being handed out again, either to make
    /// room for a newer one or because [`BlockCache::reconfigure`] lowered
    /// the threshold below their size. [`BlockCache::cleanup`] is not
    /// counted.
    pub evictions: u64,
}

impl CacheStats {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            hits: 0,
            misses: 0,
            bypassed_allocs: 0,
            bypassed_frees: 0,
            insertions: 0,
            evictions: 0,
        }
    }
}

/// Fixed-capacity cache of freed blocks, keyed by exact byte size.
#[derive(Debug)]
pub struct BlockCache {
    slots: [Option<Block>; MMC_NBLOCKS],
    cursor: usize,
    threshold: usize,
    stats: CacheStats,
}

impl BlockCache {
    /// Create an empty cache with the default threshold.
    pub const fn new() -> Self {
        Self::with_threshold(MMC_THRESHOLD)
    }

    /// Create an empty cache with the given threshold in bytes.
    pub const fn with_threshold(threshold: usize) -> Self {
        Self {
            slots: [EMPTY_SLOT; MMC_NBLOCKS],
            cursor: 0,
            threshold,
            stats: CacheStats::new(),
        }
    }

    /// Create an empty cache from a validated config.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_threshold(config.threshold))
    }

    /// Apply a new config.
    ///
    /// Cached blocks that are no longer cacheable under the new threshold
    /// are released and counted as evictions.
    pub fn reconfigure(&mut self, config: CacheConfig) -> Result<()> {
        config.validate()?;
        self.threshold = config.threshold;
        for slot in self.slots.iter_mut() {
            if slot.as_ref().is_some_and(|b| b.len() >= config.threshold) {
                if let Some(block) = slot.take() {
                    system::mm_free(block);
                    self.stats.evictions += 1;
                }
            }
        }
        Ok(())
    }

    /// Current cacheable-size threshold in bytes.
    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Get a block of exactly `size` bytes.
    ///
    /// Served from the cache when a slot holds a block of that size and
    /// `size <= threshold`; otherwise allocated from the system. Contents of
    /// a recycled block are whatever its previous owner left there.
    ///
    /// # Errors
    ///
    /// [`crate::CacheError::OutOfMemory`] if the system allocator fails.
    pub fn malloc(&mut self, size: usize) -> Result<Block> {
        if size <= self.threshold {
            if let Some(block) = self.take(size) {
                self.stats.hits += 1;
                return Ok(block);
            }
            self.stats.misses += 1;
        } else {
            self.stats.bypassed_allocs += 1;
            log::trace!("malloc of {size} bytes bypasses the block cache");
        }
        system::mm_malloc(size)
    }

    /// Get a zeroed block of `size * count` bytes.
    ///
    /// The zero-fill happens on every call, hit or miss.
    ///
    /// # Errors
    ///
    /// [`crate::CacheError::SizeOverflow`] if `size * count` overflows,
    /// [`crate::CacheError::OutOfMemory`] if the system allocator fails.
    pub fn calloc(&mut self, size: usize, count: usize) -> Result<Block> {
        let total = system::checked_total(size, count)?;
        let mut block = self.malloc(total)?;
        block.zero();
        Ok(block)
    }

    /// Give a block back.
    ///
    /// Blocks below the threshold go into the first empty slot, or replace
    /// the block under the eviction cursor when the cache is full. Larger
    /// blocks go straight back to the system.
    pub fn free(&mut self, block: Block) {
        let size = block.len();
        if size == 0 || size >= self.threshold {
            self.stats.bypassed_frees += 1;
            system::mm_free(block);
            return;
        }

        self.stats.insertions += 1;
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(block);
            return;
        }

        let victim = self.slots[self.cursor].replace(block);
        if let Some(victim) = victim {
            log::debug!(
                "block cache full: evicting {} byte block from slot {}",
                victim.len(),
                self.cursor
            );
            system::mm_free(victim);
        }
        self.stats.evictions += 1;
        self.cursor = (self.cursor + 1) % MMC_NBLOCKS;
    }

    /// Release every cached block and empty all slots.
    ///
    /// Calling it again on an empty cache does nothing.
    pub fn cleanup(&mut self) {
        let mut released = 0usize;
        for slot in self.slots.iter_mut() {
            if let Some(block) = slot.take() {
                system::mm_free(block);
                released += 1;
            }
        }
        if released > 0 {
            log::debug!("block cache cleanup released {released} blocks");
        }
    }

    fn take(&mut self, size: usize) -> Option<Block> {
        self.slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|b| b.len() == size))
            .and_then(Option::take)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        MMC_NBLOCKS
    }

    /// Slot that the next eviction will replace.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True if some slot holds a block of exactly `size` bytes.
    pub fn contains_size(&self, size: usize) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.as_ref().is_some_and(|b| b.len() == size))
    }

    /// Byte size held by each slot, 0 for empty slots.
    pub fn slot_sizes(&self) -> [usize; MMC_NBLOCKS] {
        let mut sizes = [0; MMC_NBLOCKS];
        for (size, slot) in sizes.iter_mut().zip(self.slots.iter()) {
            *size = slot.as_ref().map_or(0, Block::len);
        }
        sizes
    }

    /// Usage counters since creation or the last [`Self::reset_stats`].
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zero all usage counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
    }
}

impl Default for BlockCache {
    fn default() -> Self {
        Self::new()
    }
}
