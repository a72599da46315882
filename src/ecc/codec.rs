//! Encoding and greedy syndrome decoding.
//!
//! Decoding walks the first `k` positions of the received word once, left to
//! right. A bit is flipped only when doing so strictly lowers the coset leader
//! weight of the word's syndrome. The trailing `n - k` redundancy positions are
//! never flipped since they are dropped once the pass is over.

use crate::ecc::syndrome::SyndromeTable;
use crate::math::{BitMatrix, Vector};
use log::trace;

/// Encodes a `k`-bit message with the transposed generator `G^T` (`n x k`).
///
/// Equivalent to `message * G`; the result is `n` bits wide.
#[inline]
pub fn encode(message: Vector, generator_t: &BitMatrix) -> Vector {
    generator_t.multiply_right(message)
}

/// Decodes an `n`-bit received word to its `k`-bit message.
///
/// `h` is the `(n-k) x n` control matrix and `table` its syndrome table.
/// Always terminates after at most `k` steps. Uncorrectable error patterns
/// are not reported; the result is then simply some `k`-bit message.
pub fn decode(received: Vector, table: &SyndromeTable, h: &BitMatrix) -> Vector {
    let n = h.cols();
    let redundancy = h.rows();
    let k = n.saturating_sub(redundancy);

    let mut r = received;
    for i in 0..k {
        let weight = table.weight(h.multiply_right(r));
        if weight == 0 {
            break;
        }

        let flipped = r ^ (1 << (n - i - 1));
        let flipped_weight = table.weight(h.multiply_right(flipped));
        if flipped_weight < weight {
            trace!("decode: flip position {} ({} -> {})", i, weight, flipped_weight);
            r = flipped;
        }
    }

    r.checked_shr(redundancy as u32).unwrap_or(0)
}
