//! Binary linear block codes with syndrome-table decoding.
//!
//! This module provides:
//! - Control matrix derivation from a standard-form generator
//! - Complete syndrome tables of coset leader weights
//! - Systematic encoding and greedy syndrome decoding
//! - A binary symmetric channel for injecting bit errors
//!
//! # Examples
//!
//! ```rust
//! use lincode::ecc::{Channel, CodeParams, LinearCode};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let code = LinearCode::random(CodeParams::new(10, 4).unwrap(), &mut rng).unwrap();
//! let mut channel = Channel::with_rng(rng);
//!
//! let sent = code.encode(0b1001);
//! let received = channel.send_vector(sent, code.n(), 0.0);
//! assert_eq!(code.decode(received), 0b1001);
//! ```

pub mod channel;
pub mod codec;
pub mod control;
pub mod linear_code;
pub mod syndrome;

pub use channel::Channel;
pub use codec::{decode, encode};
pub use control::{derive_control_matrix, is_standard_form, standard_form_generator};
pub use linear_code::{CodeParams, LinearCode};
pub use syndrome::{SyndromeTable, MAX_REDUNDANCY};

use crate::error::Result;
use crate::math::BitMatrix;

/// Builds the syndrome table for control matrix `h`.
pub fn build_syndrome_table(h: &BitMatrix) -> Result<SyndromeTable> {
    SyndromeTable::build(h)
}
