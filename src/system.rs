//! Direct system allocation, bypassing the block cache.
//!
//! These are the calls the cache falls through to on a miss. They report
//! exhaustion as [`CacheError::OutOfMemory`] instead of aborting; wrap them
//! with [`crate::OrDie`] to get abort-on-failure.

use crate::block::Block;
use crate::error::{CacheError, Result};

/// Allocate `size` bytes from the system allocator.
#[inline]
pub fn mm_malloc(size: usize) -> Result<Block> {
    Block::allocate(size)
}

/// Allocate `count * size` zeroed bytes from the system allocator.
#[inline]
pub fn mm_calloc(count: usize, size: usize) -> Result<Block> {
    let total = checked_total(size, count)?;
    Block::allocate(total)
}

/// Release a block to the system allocator.
#[inline]
pub fn mm_free(block: Block) {
    drop(block);
}

/// `size * count`, or [`CacheError::SizeOverflow`].
pub(crate) fn checked_total(size: usize, count: usize) -> Result<usize> {
    size.checked_mul(count)
        .ok_or(CacheError::SizeOverflow { size, count })
}
