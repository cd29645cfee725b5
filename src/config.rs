//! Block cache configuration.
//!
//! The only tunable is the cacheable-size threshold. Its default is an
//! estimate of the platform L2 cache size, which can be fixed at build time
//! through the `GF2CORE_CPU_L2_CACHE` environment variable (bytes, decimal)
//! and changed at runtime by constructing a [`CacheConfig`].
//!
//! # Example
//!
//! ```
//! use gf2core::CacheConfig;
//!
//! let config = CacheConfig::with_threshold(64 * 1024);
//! let json = config.to_json().unwrap();
//! let restored = CacheConfig::from_json(&json).unwrap();
//! assert_eq!(config, restored);
//! ```

use crate::error::{CacheError, Result};
use serde::{Deserialize, Serialize};

/// Fallback L2 cache size when none is given at build time.
const FALLBACK_L2_CACHE: usize = 524_288;

/// Fallback L1 cache size when none is given at build time.
const FALLBACK_L1_CACHE: usize = 16_384;

/// Estimated L2 cache size in bytes.
pub const CPU_L2_CACHE: usize = parse_bytes(option_env!("GF2CORE_CPU_L2_CACHE"), FALLBACK_L2_CACHE);

/// Estimated L1 cache size in bytes.
pub const CPU_L1_CACHE: usize = parse_bytes(option_env!("GF2CORE_CPU_L1_CACHE"), FALLBACK_L1_CACHE);

/// Maximum number of bytes requested from the system in one call.
pub const MM_MAX_MALLOC: usize = 1 << 30;

/// Number of blocks the cache holds.
pub const MMC_NBLOCKS: usize = 16;

/// Default cacheable-size threshold.
pub const MMC_THRESHOLD: usize = CPU_L2_CACHE;

/// Parse a decimal byte count, falling back on missing, empty, zero or
/// malformed input.
const fn parse_bytes(raw: Option<&str>, fallback: usize) -> usize {
    let bytes = match raw {
        Some(s) => s.as_bytes(),
        None => return fallback,
    };
    if bytes.is_empty() {
        return fallback;
    }
    let mut value: usize = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return fallback;
        }
        value = match value.checked_mul(10) {
            Some(v) => match v.checked_add((b - b'0') as usize) {
                Some(v) => v,
                None => return fallback,
            },
            None => return fallback,
        };
        i += 1;
    }
    if value == 0 {
        fallback
    } else {
        value
    }
}

/// Configuration for a [`crate::BlockCache`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Blocks strictly smaller than this are kept on free; blocks up to and
    /// including this size are looked up on malloc.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

fn default_threshold() -> usize {
    MMC_THRESHOLD
}

impl CacheConfig {
    /// Create a config with an explicit threshold.
    pub const fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Check that the threshold is usable.
    ///
    /// A threshold of 0 is allowed and disables caching. Thresholds above
    /// [`MM_MAX_MALLOC`] are rejected.
    pub fn validate(&self) -> Result<()> {
        if self.threshold > MM_MAX_MALLOC {
            return Err(CacheError::InvalidParameter(format!(
                "threshold {} exceeds the {} byte single-allocation limit",
                self.threshold, MM_MAX_MALLOC
            )));
        }
        Ok(())
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::with_threshold(MMC_THRESHOLD)
    }
}
