//! Binary linear block codes over GF(2).
//!
//! Derives a control matrix from a standard-form generator, builds a complete
//! syndrome table of coset leader weights, encodes messages, and decodes
//! received words with a greedy syndrome-weight search. A binary symmetric
//! channel injects independent bit errors for testing.

pub mod ecc;
pub mod error;
pub mod io;
pub mod math;
pub mod sweep;

pub use ecc::{
    build_syndrome_table, decode, derive_control_matrix, encode, Channel, CodeParams, LinearCode,
    SyndromeTable,
};
pub use error::{Error, Result};
pub use math::{BitMatrix, Vector};
