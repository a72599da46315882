pub mod bit_matrix;
pub mod combination;

pub use bit_matrix::{low_mask, BitMatrix, Vector, MAX_DIM};
pub use combination::{next_combination, EqualWeight};
