//! Block - Owned, size-carrying heap buffer.
//!
//! A [`Block`] is the unit the block cache hands out and takes back. It owns
//! a 16-byte aligned allocation and remembers its own byte size, so a block
//! can never be returned to the cache (or the system) with the wrong size.
//! Ownership moves on [`crate::BlockCache::malloc`] and
//! [`crate::BlockCache::free`]; a block is never referenced by a caller and
//! a cache slot at the same time.
//!
//! Dropping a block releases it straight to the system allocator.
//!
//! # Examples
//!
//! ```
//! use gf2core::system::mm_malloc;
//!
//! let mut row = mm_malloc(4 * 8).unwrap();
//! row.as_words_mut()[0] = 0xFF;
//! assert_eq!(row.len(), 32);
//! assert_eq!(row.as_words().len(), 4);
//! ```

use crate::error::{CacheError, Result};
use crate::word::Word;
use std::alloc::{self, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// Alignment of every block, in bytes.
pub const BLOCK_ALIGN: usize = 16;

/// Owned heap buffer of a fixed byte size.
pub struct Block {
    ptr: NonNull<u8>,
    size: usize,
}

// A block is uniquely owned, like a `Box<[u8]>`.
unsafe impl Send for Block {}
unsafe impl Sync for Block {}

impl Block {
    /// Allocate `size` bytes from the system allocator.
    ///
    /// Fresh memory is zero-filled so that the safe byte views never expose
    /// uninitialized bytes. Blocks recycled through the cache keep whatever
    /// their previous owner wrote.
    pub(crate) fn allocate(size: usize) -> Result<Self> {
        if size == 0 {
            return Ok(Self {
                ptr: NonNull::<Word>::dangling().cast(),
                size: 0,
            });
        }

        let layout = Self::layout(size)?;
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        NonNull::new(raw)
            .map(|ptr| Self { ptr, size })
            .ok_or(CacheError::OutOfMemory { size })
    }

    fn layout(size: usize) -> Result<Layout> {
        Layout::from_size_align(size, BLOCK_ALIGN).map_err(|_| CacheError::OutOfMemory { size })
    }

    /// Size of the block in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.size
    }

    /// True for the zero-byte block.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Start address of the block.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Mutable start address of the block.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Set every byte to zero.
    #[inline]
    pub fn zero(&mut self) {
        // SAFETY: ptr is valid for `size` bytes (or dangling with size 0).
        unsafe { std::ptr::write_bytes(self.ptr.as_ptr(), 0, self.size) }
    }

    /// View the block as whole words.
    ///
    /// Trailing bytes that do not fill a word are not included.
    #[inline]
    pub fn as_words(&self) -> &[Word] {
        let n = self.size / std::mem::size_of::<Word>();
        // SAFETY: BLOCK_ALIGN satisfies Word alignment, every byte is
        // initialized and any bit pattern is a valid Word.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().cast::<Word>(), n) }
    }

    /// Mutable word view of the block.
    #[inline]
    pub fn as_words_mut(&mut self) -> &mut [Word] {
        let n = self.size / std::mem::size_of::<Word>();
        // SAFETY: see `as_words`; `&mut self` guarantees uniqueness.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<Word>(), n) }
    }
}

impl Deref for Block {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        // SAFETY: ptr is valid and initialized for `size` bytes.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }
}

impl DerefMut for Block {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees uniqueness.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        if self.size == 0 {
            return;
        }
        // SAFETY: the same layout was validated in `allocate`.
        unsafe {
            let layout = Layout::from_size_align_unchecked(self.size, BLOCK_ALIGN);
            alloc::dealloc(self.ptr.as_ptr(), layout);
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("ptr", &self.ptr)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::alignment;

    #[test]
    fn test_allocate_is_aligned_and_zeroed() {
        let block = Block::allocate(100).unwrap();
        assert_eq!(block.len(), 100);
        assert_eq!(alignment(block.as_ptr(), BLOCK_ALIGN), 0);
        assert!(block.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_size_block() {
        let block = Block::allocate(0).unwrap();
        assert!(block.is_empty());
        assert!(block.as_words().is_empty());
        assert_eq!(&block[..], &[] as &[u8]);
    }

    #[test]
    fn test_word_view() {
        let mut block = Block::allocate(20).unwrap();
        assert_eq!(block.as_words().len(), 2);
        block.as_words_mut()[1] = Word::MAX;
        assert_eq!(&block[8..16], &[0xFFu8; 8]);
        assert_eq!(&block[16..], &[0u8; 4]);
    }

    #[test]
    fn test_zero() {
        let mut block = Block::allocate(33).unwrap();
        block.fill(0xAB);
        block.zero();
        assert!(block.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_oversized_layout_is_out_of_memory() {
        let err = Block::allocate(usize::MAX).unwrap_err();
        assert!(matches!(err, CacheError::OutOfMemory { size } if size == usize::MAX));
    }
}
