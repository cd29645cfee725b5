//! Word - Packed 64-column bit primitives.
//!
//! This module provides the word-level operations that row-oriented GF(2)
//! matrix code runs in its inner loops: mask construction for partially used
//! edge words, single-bit access, bit reversal and the lowest-set-bit
//! comparison used when enumerating Gray codes.
//!
//! # Design
//!
//! - A [`Word`] is a `u64` holding 64 packed columns
//! - Column `i` of a word lives in bit `i` (`1 << i`), so the "left" columns
//!   (lowest index) are the low-order bits
//! - Every function is `const`, total over its documented domain, and
//!   allocation-free
//! - Domains are checked with `debug_assert!` only; release builds pay
//!   nothing and out-of-domain input is a caller bug
//!
//! Nothing here touches shared state, so all of it is safe to call from any
//! number of threads at once.
//!
//! # Examples
//!
//! ```
//! use gf2core::word::{mask_left, mask_middle, get_bit, set_bit, RADIX};
//!
//! // Valid columns of the last word of a 100-column row.
//! let mask = mask_left(100 % RADIX);
//! assert_eq!(mask.count_ones(), 36);
//!
//! // Columns 3..7 of a word.
//! assert_eq!(mask_middle(4, 3), 0b111_1000);
//!
//! let w = set_bit(0, 17);
//! assert_eq!(get_bit(w, 17), 1);
//! ```

/// Packed word of 64 GF(2) columns.
pub type Word = u64;

/// Boolean-valued integer: always 0 or 1.
pub type Bit = u8;

/// Row and column index type used by matrix code.
pub type Rci = i32;

/// Index type for the word array that makes up a row.
pub type Wi = i32;

/// Number of bits in a word.
pub const RADIX: usize = 64;

/// The number one as a word.
pub const ONE: Word = 1;

/// A word with all bits set.
pub const FFFF: Word = Word::MAX;

// =============================================================================
// Masks
// =============================================================================

/// Mask of the `n % 64` lowest columns, with `n == 0` meaning all 64.
///
/// Always returns 1 to 64 set bits, never zero bits. Matrix code uses it as
/// `mask_left((ncols + offset) % RADIX)` to select the valid columns of the
/// most significant word of a row.
///
/// ```text
///  n     output (bit 63 .. bit 0)
///  0=64  1111...1111
///  1     0000...0001
///  2     0000...0011
///  63    0111...1111
/// ```
///
/// # Panics
///
/// Panics in debug mode if `n > 64`.
#[inline(always)]
pub const fn mask_left(n: usize) -> Word {
    debug_assert!(n <= RADIX, "mask_left: n must be in 0..=64");
    FFFF >> ((RADIX - n) % RADIX)
}

/// Mask of the `n` highest columns.
///
/// Used as `mask_right(RADIX - offset % RADIX)` to select the valid columns
/// of the least significant word of a row.
///
/// ```text
///  n     output (bit 63 .. bit 0)
///  1     1000...0000
///  2     1100...0000
///  63    1111...1110
///  64    1111...1111
/// ```
///
/// # Panics
///
/// Panics in debug mode if `n == 0` or `n > 64`.
#[inline(always)]
pub const fn mask_right(n: usize) -> Word {
    debug_assert!(n >= 1 && n <= RADIX, "mask_right: n must be in 1..=64");
    FFFF << (RADIX - n)
}

/// Mask of `n` columns starting at column `offset`.
///
/// Equivalent to `mask_left(n + offset) & mask_right(RADIX - offset)`. Used
/// when a whole row fits in one word (`ncols + offset <= RADIX`).
///
/// # Panics
///
/// Panics in debug mode unless `offset < 64` and `1 <= n <= 64 - offset`.
#[inline(always)]
pub const fn mask_middle(n: usize, offset: usize) -> Word {
    debug_assert!(offset < RADIX, "mask_middle: offset must be < 64");
    debug_assert!(n >= 1 && n <= RADIX - offset, "mask_middle: n out of range");
    mask_left(n) << offset
}

// =============================================================================
// Single Bit Operations
// =============================================================================

/// Get column `spot` of `w` (returns 0 or 1).
///
/// # Panics
///
/// Panics in debug mode if `spot >= 64`.
#[inline(always)]
pub const fn get_bit(w: Word, spot: usize) -> Bit {
    debug_assert!(spot < RADIX, "get_bit: spot out of range");
    ((w >> spot) & ONE) as Bit
}

/// Return `w` with column `spot` set to 1.
///
/// # Panics
///
/// Panics in debug mode if `spot >= 64`.
#[inline(always)]
pub const fn set_bit(w: Word, spot: usize) -> Word {
    debug_assert!(spot < RADIX, "set_bit: spot out of range");
    w | (ONE << spot)
}

/// Return `w` with column `spot` cleared to 0.
///
/// # Panics
///
/// Panics in debug mode if `spot >= 64`.
#[inline(always)]
pub const fn clear_bit(w: Word, spot: usize) -> Word {
    debug_assert!(spot < RADIX, "clear_bit: spot out of range");
    w & !(ONE << spot)
}

/// Return `w` with column `spot` flipped.
///
/// # Panics
///
/// Panics in debug mode if `spot >= 64`.
#[inline(always)]
pub const fn flip_bit(w: Word, spot: usize) -> Word {
    debug_assert!(spot < RADIX, "flip_bit: spot out of range");
    w ^ (ONE << spot)
}

/// Return `w` with column `spot` set to `value`.
///
/// Any non-zero `value` is treated as 1. The result is computed with masks
/// only, so the instruction stream does not depend on `value`.
///
/// # Panics
///
/// Panics in debug mode if `spot >= 64`.
#[inline(always)]
pub const fn write_bit(w: Word, spot: usize, value: Bit) -> Word {
    debug_assert!(spot < RADIX, "write_bit: spot out of range");
    let bit = ONE << spot;
    let fill = ((value != 0) as Word).wrapping_neg();
    (w & !bit) | (fill & bit)
}

// =============================================================================
// Whole-Word Operations
// =============================================================================

/// Reverse the column order of `w` (column 0 swaps with column 63, etc).
///
/// SWAR butterfly: swap adjacent 1-bit groups, then 2-bit groups, and so on
/// up to the two 32-bit halves. Applying it twice gives back `w`.
#[inline(always)]
pub const fn swap_bits(w: Word) -> Word {
    let mut v = w;
    v = ((v >> 1) & 0x5555_5555_5555_5555) | ((v & 0x5555_5555_5555_5555) << 1);
    v = ((v >> 2) & 0x3333_3333_3333_3333) | ((v & 0x3333_3333_3333_3333) << 2);
    v = ((v >> 4) & 0x0F0F_0F0F_0F0F_0F0F) | ((v & 0x0F0F_0F0F_0F0F_0F0F) << 4);
    v = ((v >> 8) & 0x00FF_00FF_00FF_00FF) | ((v & 0x00FF_00FF_00FF_00FF) << 8);
    v = ((v >> 16) & 0x0000_FFFF_0000_FFFF) | ((v & 0x0000_FFFF_0000_FFFF) << 16);
    (v >> 32) | (v << 32)
}

/// Index of the lowest set column of `w`, or 64 if `w` is zero.
#[inline(always)]
pub const fn lsb_index(w: Word) -> u32 {
    w.trailing_zeros()
}

/// True iff the lowest set column of `a` comes strictly before that of `b`.
///
/// A zero word sorts last (index 64), so `lesser_lsb(0, x)` is always false
/// and `lesser_lsb(a, 0)` is true for any non-zero `a`.
///
/// `(a - 1) ^ a` sets every bit up to and including the lowest set bit of
/// `a`; if that run hits a set bit of `b`, then `b`'s lowest bit is not
/// after `a`'s.
#[inline(always)]
pub const fn lesser_lsb(a: Word, b: Word) -> bool {
    if b != 0 {
        (a.wrapping_sub(1) ^ a) & b == 0
    } else {
        a != 0
    }
}

// =============================================================================
// Integer Helpers
// =============================================================================

/// `2^i` as a word.
///
/// # Panics
///
/// Panics in debug mode if `i >= 64`.
#[inline(always)]
pub const fn two_pow(i: usize) -> Word {
    debug_assert!(i < RADIX, "two_pow: exponent out of range");
    ONE << i
}

/// Number of blocks of length `y` needed to hold `x` elements.
///
/// Typical use: words per row, `div_ceil(ncols + offset, RADIX)`.
#[inline(always)]
pub const fn div_ceil(x: usize, y: usize) -> usize {
    if x % y != 0 {
        x / y + 1
    } else {
        x / y
    }
}

/// Alignment of `addr` with respect to `n` (0 means aligned).
///
/// For example, address 17 is 1-aligned with respect to 16.
#[inline(always)]
pub fn alignment<T>(addr: *const T, n: usize) -> usize {
    (addr as usize) % n
}
