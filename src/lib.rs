//! gf2core - Word Primitives and Block Cache for GF(2) Linear Algebra
//!
//! gf2core is the substrate beneath a bit-packed matrix library over the
//! two-element field. It provides two independent pieces:
//!
//! - **Word engine** ([`word`]): masks, single-bit access, bit reversal and
//!   lowest-set-bit comparison on 64-column packed words
//! - **Block cache** ([`cache`]): a 16-slot, exact-size cache of freed row
//!   buffers in front of the system allocator, for the allocate/free churn
//!   of elimination and multiplication kernels
//!
//! # Examples
//!
//! ## Masking the edge word of a row
//!
//! ```
//! use gf2core::word::{mask_left, RADIX};
//!
//! let ncols = 100;
//! let last = mask_left(ncols % RADIX);
//! assert_eq!(last.count_ones(), 36);
//! ```
//!
//! ## Recycling row buffers
//!
//! ```
//! use gf2core::BlockCache;
//!
//! let mut cache = BlockCache::new();
//! let mut row = cache.calloc(8, 16).unwrap();
//! row.as_words_mut()[0] = 1;
//! cache.free(row);
//!
//! let reused = cache.malloc(128).unwrap();
//! assert_eq!(reused.as_words()[0], 1);
//! assert_eq!(cache.stats().hits, 1);
//! ```
//!
//! # Errors
//!
//! Only allocation can fail, and only when the system allocator is
//! exhausted (or a size computation overflows). That surfaces as
//! [`CacheError`]; callers that want the classic abort-on-exhaustion
//! behavior use [`OrDie::or_die`] or [`die`].
//!
//! # Safety
//!
//! The word engine uses `debug_assert!` for its argument domains:
//!
//! - Zero-cost in release builds
//! - Full validation during development and testing
//!
//! Blocks are owned handles, so a buffer can never be held by a caller and
//! a cache slot at the same time.

pub mod block;
pub mod cache;
pub mod config;
pub mod error;
pub mod fatal;
pub mod global;
pub mod system;
pub mod word;

// Re-exports for convenient access
pub use block::{Block, BLOCK_ALIGN};
pub use cache::{BlockCache, CacheStats};
pub use config::{CacheConfig, CPU_L1_CACHE, CPU_L2_CACHE, MMC_NBLOCKS, MMC_THRESHOLD};
pub use error::{CacheError, Result};
pub use fatal::{die, OrDie};
pub use global::{cache_calloc, cache_cleanup, cache_free, cache_malloc};
pub use word::{Bit, Word, FFFF, ONE, RADIX};
