//! Complete syndrome table for syndrome decoding.
//!
//! For a control matrix `H` with `r = n - k` rows, every received word falls
//! into one of `2^r` cosets of the code, identified by its syndrome `H * v`.
//! The table records, for each syndrome, the Hamming weight of the lightest
//! word in that coset (the coset leader weight).
//!
//! Construction enumerates error patterns by strictly increasing weight, so
//! the first pattern to reach a syndrome is a lightest one. It stops as soon as
//! all `2^r` syndromes have been seen. The worst case still visits on the order
//! of `C(n, n/2)` patterns; callers must keep `n` and `n - k` small enough for
//! that to finish.

use crate::error::{Error, Result};
use crate::math::combination::EqualWeight;
use crate::math::{BitMatrix, Vector};
use log::{debug, warn};

/// Largest redundancy (`n - k`) for which a dense table is allocated.
pub const MAX_REDUNDANCY: usize = 32;

/// Marks a syndrome that no enumerated pattern has produced yet.
const UNSEEN: u8 = u8::MAX;

/// Maps each syndrome to its coset leader weight.
///
/// Stored densely, indexed by syndrome value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyndromeTable {
    redundancy: usize,
    weights: Vec<u8>,
    found: usize,
}

impl SyndromeTable {
    /// Builds the table for control matrix `h`.
    ///
    /// # Arguments
    ///
    /// * `h` - Control matrix with `n - k` rows and `n` columns
    ///
    /// # Returns
    ///
    /// The coset leader weight of every syndrome reachable from `h`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dimension`] when `h` has more than [`MAX_REDUNDANCY`]
    /// rows.
    pub fn build(h: &BitMatrix) -> Result<Self> {
        let redundancy = h.rows();
        if redundancy > MAX_REDUNDANCY {
            return Err(Error::dimension(format!(
                "syndrome table for {} redundancy bits exceeds the {}-bit limit",
                redundancy, MAX_REDUNDANCY
            )));
        }

        let syndrome_count = 1usize << redundancy;
        let mut weights = vec![UNSEEN; syndrome_count];
        weights[0] = 0;
        let mut table = SyndromeTable {
            redundancy,
            weights,
            found: 1,
        };
        if syndrome_count == 1 {
            return Ok(table);
        }

        let n = h.cols();
        let mut examined: u64 = 0;
        for w in 1..=n {
            for pattern in EqualWeight::new(n, w) {
                examined += 1;
                let syndrome = h.multiply_right(pattern) as usize;
                let slot = &mut table.weights[syndrome];
                if *slot != UNSEEN {
                    continue;
                }
                *slot = w as u8;
                table.found += 1;
                if table.found == syndrome_count {
                    debug!(
                        "syndrome table complete: {} syndromes, {} patterns examined, covering radius {}",
                        syndrome_count, examined, w
                    );
                    return Ok(table);
                }
            }
        }

        warn!(
            "syndrome table incomplete: {} of {} syndromes reachable; control matrix is rank deficient",
            table.found, syndrome_count
        );
        Ok(table)
    }

    /// Coset leader weight of `syndrome`; zero for syndromes not in the table.
    #[inline]
    pub fn weight(&self, syndrome: Vector) -> u8 {
        self.get(syndrome).unwrap_or(0)
    }

    /// Coset leader weight of `syndrome`, if the table holds it.
    pub fn get(&self, syndrome: Vector) -> Option<u8> {
        let index = usize::try_from(syndrome).ok()?;
        match self.weights.get(index) {
            Some(&w) if w != UNSEEN => Some(w),
            _ => None,
        }
    }

    /// Number of syndromes recorded.
    pub fn len(&self) -> usize {
        self.found
    }

    /// Always false: the zero syndrome is present from construction.
    pub fn is_empty(&self) -> bool {
        self.found == 0
    }

    /// Number of syndromes the code has, `2^(n-k)`.
    pub fn syndrome_count(&self) -> usize {
        self.weights.len()
    }

    /// Number of redundancy bits the table was built for.
    pub fn redundancy(&self) -> usize {
        self.redundancy
    }

    /// Whether every syndrome has a recorded weight.
    pub fn is_complete(&self) -> bool {
        self.found == self.weights.len()
    }

    /// Largest coset leader weight, i.e. the covering radius of the code.
    pub fn max_weight(&self) -> u8 {
        self.iter().map(|(_, w)| w).max().unwrap_or(0)
    }

    /// Iterates over `(syndrome, weight)` pairs in syndrome order.
    pub fn iter(&self) -> impl Iterator<Item = (Vector, u8)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != UNSEEN)
            .map(|(s, &w)| (s as Vector, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::control::{derive_control_matrix, standard_form_generator};
    use crate::math::low_mask;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn hamming_7_4_control() -> BitMatrix {
        let free = BitMatrix::from_rows(3, &[0b110, 0b101, 0b011, 0b111]).unwrap();
        derive_control_matrix(&standard_form_generator(&free).unwrap()).unwrap()
    }

    /// Lightest weight per syndrome found by scanning all `2^n` words.
    fn brute_force_weights(h: &BitMatrix) -> Vec<Option<u8>> {
        let mut best = vec![None; 1 << h.rows()];
        for v in 0..=low_mask(h.cols()) {
            let s = h.multiply_right(v) as usize;
            let w = v.count_ones() as u8;
            if best[s].map_or(true, |b| w < b) {
                best[s] = Some(w);
            }
        }
        best
    }

    #[test]
    fn test_hamming_7_4_table() {
        let table = SyndromeTable::build(&hamming_7_4_control()).unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.syndrome_count(), 8);
        assert!(table.is_complete());
        assert_eq!(table.weight(0), 0);
        for s in 1..8 {
            assert_eq!(table.get(s), Some(1));
        }
        assert_eq!(table.max_weight(), 1);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..40 {
            let n = rng.gen_range(2..=12);
            let k = rng.gen_range(1..n);
            let free = BitMatrix::random(k, n - k, &mut rng).unwrap();
            let h = derive_control_matrix(&standard_form_generator(&free).unwrap()).unwrap();

            let table = SyndromeTable::build(&h).unwrap();
            assert!(table.is_complete());
            assert_eq!(table.len(), 1 << (n - k));
            assert_eq!(table.weight(0), 0);

            let expected = brute_force_weights(&h);
            for (s, w) in table.iter() {
                assert_eq!(Some(w), expected[s as usize], "syndrome {:b}", s);
            }
        }
    }

    #[test]
    fn test_weights_bounded_by_redundancy() {
        // The identity block alone reaches every syndrome with at most n-k bits.
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let n = rng.gen_range(2..=14);
            let k = rng.gen_range(1..n);
            let free = BitMatrix::random(k, n - k, &mut rng).unwrap();
            let h = derive_control_matrix(&standard_form_generator(&free).unwrap()).unwrap();
            let table = SyndromeTable::build(&h).unwrap();
            assert!(table.iter().all(|(_, w)| w as usize <= n - k));
        }
    }

    #[test]
    fn test_no_redundancy() {
        let h = derive_control_matrix(&BitMatrix::identity(5, 5).unwrap()).unwrap();
        let table = SyndromeTable::build(&h).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.is_complete());
        assert_eq!(table.weight(0), 0);
        assert_eq!(table.max_weight(), 0);
    }

    #[test]
    fn test_repetition_code() {
        // (5,1) repetition code corrects two errors.
        let free = BitMatrix::from_rows(4, &[0b1111]).unwrap();
        let h = derive_control_matrix(&standard_form_generator(&free).unwrap()).unwrap();
        let table = SyndromeTable::build(&h).unwrap();
        assert_eq!(table.len(), 16);
        assert_eq!(table.max_weight(), 2);
        assert_eq!(table.weight(h.multiply_right(0b10000)), 1);
        assert_eq!(table.weight(h.multiply_right(0b11000)), 2);
    }

    #[test]
    fn test_rank_deficient_control_matrix() {
        // Two identical rows: only syndromes 00 and 11 are reachable.
        let h = BitMatrix::from_rows(3, &[0b101, 0b101]).unwrap();
        let table = SyndromeTable::build(&h).unwrap();
        assert!(!table.is_complete());
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0b11), Some(1));
        assert_eq!(table.get(0b01), None);
        assert_eq!(table.weight(0b01), 0);
    }

    #[test]
    fn test_lookup_outside_table() {
        let table = SyndromeTable::build(&hamming_7_4_control()).unwrap();
        assert_eq!(table.get(8), None);
        assert_eq!(table.weight(u64::MAX), 0);
    }

    #[test]
    fn test_redundancy_limit() {
        let h = BitMatrix::new(MAX_REDUNDANCY + 1, 40).unwrap();
        assert!(matches!(SyndromeTable::build(&h), Err(Error::Dimension(_))));
    }
}
