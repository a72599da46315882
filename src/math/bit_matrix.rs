//! Dense binary matrices over GF(2) with at most 64 rows and 64 columns.
//!
//! Each row is packed into a single `u64`. Column 0 is the most significant of
//! the row's `cols` significant bits, so a row read as an integer spells the
//! row left to right. Bits above the declared width are always zero.
//!
//! Column vectors use the same convention: a [`Vector`] of width `w` keeps its
//! first component in bit `w - 1` and its last component in bit 0.
//!
//! # Examples
//!
//! ```
//! use lincode::math::BitMatrix;
//!
//! let m = BitMatrix::from_rows(3, &[0b110, 0b011]).unwrap();
//! // Row parities of (110 & 101) and (011 & 101).
//! assert_eq!(m.multiply_right(0b101), 0b11);
//! assert_eq!(m.transpose().rows(), 3);
//! ```

use crate::error::{Error, Result};
use rand::Rng;
use std::fmt;

/// A message, codeword or syndrome, stored in the low-order bits of a word.
pub type Vector = u64;

/// Largest row or column count a [`BitMatrix`] can hold.
pub const MAX_DIM: usize = 64;

/// Mask with the low `bits` bits set.
#[inline]
pub fn low_mask(bits: usize) -> Vector {
    if bits >= MAX_DIM {
        Vector::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Binary matrix stored row-wise as fixed-width bit patterns.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    rows: usize,
    cols: usize,
    data: [Vector; MAX_DIM],
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl BitMatrix {
    /// Returns the 0x0 matrix.
    pub const fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: [0; MAX_DIM],
        }
    }

    /// Returns an all-zero `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        check_shape(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: [0; MAX_DIM],
        })
    }

    /// Returns a `rows x cols` matrix with ones on the main diagonal, up to
    /// `min(rows, cols)`.
    pub fn identity(rows: usize, cols: usize) -> Result<Self> {
        let mut m = Self::new(rows, cols)?;
        for i in 0..rows.min(cols) {
            m.put(i, i, true);
        }
        Ok(m)
    }

    /// Builds a matrix from packed rows, each `cols` bits wide.
    pub fn from_rows(cols: usize, rows: &[Vector]) -> Result<Self> {
        let mut m = Self::new(rows.len(), cols)?;
        for (r, &bits) in rows.iter().enumerate() {
            if bits & !low_mask(cols) != 0 {
                return Err(Error::dimension(format!(
                    "row {} has bits set beyond column width {}",
                    r, cols
                )));
            }
            m.data[r] = bits;
        }
        Ok(m)
    }

    /// Fills a `rows x cols` matrix with independent uniform bits.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let mut m = Self::new(rows, cols)?;
        let mask = low_mask(cols);
        for row in m.data.iter_mut().take(rows) {
            *row = rng.gen::<u64>() & mask;
        }
        Ok(m)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `row` as a packed `cols`-bit pattern.
    pub fn row(&self, row: usize) -> Result<Vector> {
        if row >= self.rows {
            return Err(Error::Index {
                row,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.data[row])
    }

    /// Iterates over the packed rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = Vector> + '_ {
        self.data[..self.rows].iter().copied()
    }

    /// Reads the bit at (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        self.check_index(row, col)?;
        Ok(self.bit(row, col))
    }

    /// Writes the bit at (`row`, `col`).
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        self.check_index(row, col)?;
        self.put(row, col, value);
        Ok(())
    }

    /// Computes `M * v` over GF(2).
    ///
    /// Result bit for row `r` is the parity of `row_r & v`; rows are assembled
    /// most significant first, so the result is `rows` bits wide. The caller
    /// must zero every bit of `v` above `cols`.
    pub fn multiply_right(&self, v: Vector) -> Vector {
        self.iter_rows().fold(0, |acc, row| {
            (acc << 1) | Vector::from((row & v).count_ones() & 1)
        })
    }

    /// Copies the `rows x cols` block starting at (`row_offset`, `col_offset`).
    pub fn extract(
        &self,
        rows: usize,
        cols: usize,
        row_offset: usize,
        col_offset: usize,
    ) -> Result<Self> {
        if row_offset + rows > self.rows || col_offset + cols > self.cols {
            return Err(Error::dimension(format!(
                "cannot extract {}x{} at ({}, {}) from a {}x{} matrix",
                rows, cols, row_offset, col_offset, self.rows, self.cols
            )));
        }

        let shift = (self.cols - cols - col_offset) as u32;
        let mask = low_mask(cols);
        let mut m = Self::new(rows, cols)?;
        for r in 0..rows {
            m.data[r] = self.data[r + row_offset].checked_shr(shift).unwrap_or(0) & mask;
        }
        Ok(m)
    }

    /// Horizontal concatenation: the columns of `self` followed by those of
    /// `other`.
    pub fn append(&self, other: &Self) -> Result<Self> {
        if self.rows != other.rows {
            return Err(Error::dimension(format!(
                "cannot append a matrix with {} rows to one with {} rows",
                other.rows, self.rows
            )));
        }
        if self.cols + other.cols > MAX_DIM {
            return Err(Error::dimension(format!(
                "appended width {} exceeds {} columns",
                self.cols + other.cols,
                MAX_DIM
            )));
        }

        let mut m = Self::new(self.rows, self.cols + other.cols)?;
        for r in 0..self.rows {
            m.data[r] = self.data[r].checked_shl(other.cols as u32).unwrap_or(0) | other.data[r];
        }
        Ok(m)
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        let mut m = Self {
            rows: self.cols,
            cols: self.rows,
            data: [0; MAX_DIM],
        };
        for i in 0..self.rows {
            for j in 0..self.cols {
                m.put(j, i, self.bit(i, j));
            }
        }
        m
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::Index {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    #[inline]
    fn bit(&self, row: usize, col: usize) -> bool {
        (self.data[row] >> (self.cols - 1 - col)) & 1 == 1
    }

    #[inline]
    fn put(&mut self, row: usize, col: usize, value: bool) {
        let mask = 1 << (self.cols - 1 - col);
        if value {
            self.data[row] |= mask;
        } else {
            self.data[row] &= !mask;
        }
    }
}

fn check_shape(rows: usize, cols: usize) -> Result<()> {
    if rows > MAX_DIM || cols > MAX_DIM {
        return Err(Error::dimension(format!(
            "{}x{} exceeds the {}x{} limit",
            rows, cols, MAX_DIM, MAX_DIM
        )));
    }
    Ok(())
}

impl fmt::Display for BitMatrix {
    /// One line of `0`/`1` characters per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.iter_rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            f.write_str(&crate::io::format::format_vector(row, self.cols))?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitMatrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &&self.data[..self.rows])
            .finish()
    }
}
