//! Generator and control (parity-check) matrices of a systematic code.
//!
//! A generator in standard form is `G = [I_k | A]` (`k x n`). Its control
//! matrix is `H = [A^T | I_(n-k)]` (`(n-k) x n`), which annihilates every
//! codeword: `H * c = 0`.

use crate::error::{Error, Result};
use crate::math::BitMatrix;

/// Derives the control matrix `H = [A^T | I]` from a standard-form generator.
///
/// The free block `A` is taken from columns `k..n` of `g`. The identity block
/// on the left of `g` is not checked; see [`is_standard_form`].
///
/// # Errors
///
/// Returns [`Error::InvalidGeneratorShape`] when `g` has no rows or fewer
/// columns than rows.
pub fn derive_control_matrix(g: &BitMatrix) -> Result<BitMatrix> {
    let (k, n) = (g.rows(), g.cols());
    if k == 0 || n < k {
        return Err(Error::InvalidGeneratorShape { rows: k, cols: n });
    }

    let a_t = g.extract(k, n - k, 0, k)?.transpose();
    let identity = BitMatrix::identity(n - k, n - k)?;
    a_t.append(&identity)
}

/// Builds the standard-form generator `[I_k | A]` from a `k x (n-k)` free block.
pub fn standard_form_generator(free_block: &BitMatrix) -> Result<BitMatrix> {
    let k = free_block.rows();
    if k == 0 {
        return Err(Error::InvalidGeneratorShape {
            rows: 0,
            cols: free_block.cols(),
        });
    }
    BitMatrix::identity(k, k)?.append(free_block)
}

/// Checks whether the leftmost `k` columns of `g` form the `k x k` identity.
pub fn is_standard_form(g: &BitMatrix) -> bool {
    let k = g.rows();
    if k == 0 || g.cols() < k {
        return false;
    }
    match (g.extract(k, k, 0, 0), BitMatrix::identity(k, k)) {
        (Ok(left), Ok(identity)) => left == identity,
        _ => false,
    }
}
