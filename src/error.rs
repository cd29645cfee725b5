//! Error types for gf2core.
//!
//! Only the allocation side of the crate can fail. The bit primitives in
//! [`crate::word`] are total over their documented domains and never return
//! errors.

use thiserror::Error;

/// The main error type for gf2core operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The system allocator could not satisfy a non-zero request.
    ///
    /// Treat this as unrecoverable; [`crate::OrDie::or_die`] turns it into
    /// a process abort.
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },

    /// `size * count` does not fit in `usize`
    #[error("Allocation size overflow: {count} elements of {size} bytes")]
    SizeOverflow {
        /// Bytes per element
        size: usize,
        /// Number of elements
        count: usize,
    },

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A specialized `Result` type for gf2core operations.
pub type Result<T> = std::result::Result<T, CacheError>;
