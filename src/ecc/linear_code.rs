//! A configured `(n, k)` code with everything needed to encode and decode.
//!
//! Building a [`LinearCode`] derives the transposed generator, the control
//! matrix and the syndrome table once; they are then shared read-only by every
//! encode and decode call.
//!
//! # Examples
//!
//! ```
//! use lincode::ecc::LinearCode;
//! use lincode::math::BitMatrix;
//!
//! // (7,4) Hamming code
//! let free = BitMatrix::from_rows(3, &[0b110, 0b101, 0b011, 0b111]).unwrap();
//! let code = LinearCode::from_free_block(&free).unwrap();
//!
//! let codeword = code.encode(0b1011);
//! assert_eq!(codeword, 0b1011_010);
//! assert_eq!(code.decode(codeword ^ 0b0010_000), 0b1011);
//! ```

use crate::ecc::codec;
use crate::ecc::control::{derive_control_matrix, is_standard_form, standard_form_generator};
use crate::ecc::syndrome::{SyndromeTable, MAX_REDUNDANCY};
use crate::error::{Error, Result};
use crate::math::{BitMatrix, Vector, MAX_DIM};
use log::debug;
use rand::Rng;

/// Code length and dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeParams {
    /// Codeword length in bits
    pub n: usize,
    /// Message length in bits
    pub k: usize,
}

impl Default for CodeParams {
    fn default() -> Self {
        // (7,4) Hamming dimensions
        Self { n: 7, k: 4 }
    }
}

impl CodeParams {
    pub fn new(n: usize, k: usize) -> Result<Self> {
        let params = Self { n, k };
        params.validate()?;
        Ok(params)
    }

    /// Checks `2 <= n <= 64`, `1 <= k <= n` and `n - k <= 32`.
    pub fn validate(&self) -> Result<()> {
        if self.n < 2 || self.n > MAX_DIM {
            return Err(Error::invalid_input(format!(
                "code length n = {} must be in [2, {}]",
                self.n, MAX_DIM
            )));
        }
        if self.k < 1 || self.k > self.n {
            return Err(Error::invalid_input(format!(
                "code dimension k = {} must be in [1, {}]",
                self.k, self.n
            )));
        }
        if self.redundancy() > MAX_REDUNDANCY {
            return Err(Error::invalid_input(format!(
                "redundancy n - k = {} exceeds {}",
                self.redundancy(),
                MAX_REDUNDANCY
            )));
        }
        Ok(())
    }

    /// Number of redundancy bits, `n - k`.
    pub fn redundancy(&self) -> usize {
        self.n - self.k
    }

    /// Code rate `k / n`.
    pub fn rate(&self) -> f64 {
        self.k as f64 / self.n as f64
    }
}

/// A binary linear block code in standard form, ready for use.
#[derive(Debug, Clone)]
pub struct LinearCode {
    params: CodeParams,
    generator: BitMatrix,
    generator_t: BitMatrix,
    control: BitMatrix,
    table: SyndromeTable,
}

impl LinearCode {
    /// Builds the code whose generator is `[I_k | free_block]`.
    pub fn from_free_block(free_block: &BitMatrix) -> Result<Self> {
        Self::from_generator(standard_form_generator(free_block)?)
    }

    /// Builds the code for a standard-form generator.
    ///
    /// # Arguments
    ///
    /// * `generator` - `k x n` generator matrix `[I_k | A]`
    ///
    /// # Returns
    ///
    /// The code with its control matrix and syndrome table precomputed
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeneratorShape`] for an empty or too narrow generator,
    /// [`Error::InvalidInput`] when it does not start with an identity block.
    pub fn from_generator(generator: BitMatrix) -> Result<Self> {
        let control = derive_control_matrix(&generator)?;
        if !is_standard_form(&generator) {
            return Err(Error::invalid_input(
                "generator matrix is not in standard form [I | A]",
            ));
        }

        let params = CodeParams {
            n: generator.cols(),
            k: generator.rows(),
        };
        let table = SyndromeTable::build(&control)?;
        debug!(
            "built ({}, {}) code: {} syndromes, covering radius {}",
            params.n,
            params.k,
            table.len(),
            table.max_weight()
        );

        Ok(Self {
            params,
            generator,
            generator_t: generator.transpose(),
            control,
            table,
        })
    }

    /// Builds a code with a uniformly random free block.
    pub fn random<R: Rng + ?Sized>(params: CodeParams, rng: &mut R) -> Result<Self> {
        params.validate()?;
        let free = BitMatrix::random(params.k, params.redundancy(), rng)?;
        Self::from_free_block(&free)
    }

    pub fn params(&self) -> CodeParams {
        self.params
    }

    /// Codeword length
    pub fn n(&self) -> usize {
        self.params.n
    }

    /// Message length
    pub fn k(&self) -> usize {
        self.params.k
    }

    /// The `k x n` generator matrix `[I | A]`.
    pub fn generator(&self) -> &BitMatrix {
        &self.generator
    }

    /// The `n x k` transposed generator used for encoding.
    pub fn generator_t(&self) -> &BitMatrix {
        &self.generator_t
    }

    /// The `(n-k) x n` control matrix `[A^T | I]`.
    pub fn control(&self) -> &BitMatrix {
        &self.control
    }

    pub fn syndrome_table(&self) -> &SyndromeTable {
        &self.table
    }

    /// Syndrome `H * v` of an `n`-bit word.
    pub fn syndrome(&self, word: Vector) -> Vector {
        self.control.multiply_right(word)
    }

    /// Encodes a `k`-bit message into an `n`-bit codeword.
    pub fn encode(&self, message: Vector) -> Vector {
        codec::encode(message, &self.generator_t)
    }

    /// Decodes an `n`-bit received word into a `k`-bit message.
    pub fn decode(&self, received: Vector) -> Vector {
        codec::decode(received, &self.table, &self.control)
    }

    pub fn encode_all(&self, messages: &[Vector]) -> Vec<Vector> {
        messages.iter().map(|&m| self.encode(m)).collect()
    }

    pub fn decode_all(&self, received: &[Vector]) -> Vec<Vector> {
        received.iter().map(|&r| self.decode(r)).collect()
    }
}
