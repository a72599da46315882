//! Equal-weight bit pattern enumeration.
//!
//! Enumerates every `n`-bit word with exactly `w` bits set, in increasing
//! numeric order, using the classic "next bit permutation" step.
//!
//! # Example
//! ```
//! use lincode::math::combination::EqualWeight;
//!
//! let patterns: Vec<u64> = EqualWeight::new(4, 2).collect();
//! assert_eq!(patterns, vec![0b0011, 0b0101, 0b0110, 0b1001, 0b1010, 0b1100]);
//! ```

use crate::math::bit_matrix::{low_mask, Vector, MAX_DIM};
use num_integer::binomial;

/// Returns the next larger word with the same number of set bits.
///
/// `v` must be non-zero and must not already be the largest such word that
/// fits in 64 bits; otherwise the result wraps around.
#[inline]
pub fn next_combination(v: Vector) -> Vector {
    // Fill the trailing zeros, then carry into the lowest zero above them.
    let t = v | v.wrapping_sub(1);
    let carried = t.wrapping_add(1);
    // Bits lost to the carry are put back at the bottom.
    let missing = v.count_ones() - carried.count_ones();
    carried | low_mask(missing as usize)
}

/// Iterator over all `C(n, w)` words of `n` bits with exactly `w` bits set.
#[derive(Debug, Clone)]
pub struct EqualWeight {
    current: Vector,
    remaining: u64,
}

impl EqualWeight {
    /// Creates the enumeration for `w` set bits among the low `n` bits.
    ///
    /// Yields nothing when `w > n` or `n > 64`.
    pub fn new(n: usize, w: usize) -> Self {
        let remaining = if n > MAX_DIM || w > n {
            0
        } else {
            binomial(n as u64, w as u64)
        };
        Self {
            current: low_mask(w),
            remaining,
        }
    }

    /// Number of patterns not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for EqualWeight {
    type Item = Vector;

    fn next(&mut self) -> Option<Vector> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.current;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.current = next_combination(out);
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
