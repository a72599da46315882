//! Binary symmetric channel.
//!
//! Every transmitted bit is flipped independently with probability `p`. The
//! channel owns its random generator; each call advances that state, so one
//! `Channel` must not be shared between threads without synchronization.
//! Separate channels are fully independent.

use crate::math::{Vector, MAX_DIM};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Binary symmetric channel driven by a random generator `R`.
#[derive(Debug, Clone)]
pub struct Channel<R = StdRng> {
    rng: R,
}

impl Channel<StdRng> {
    /// Creates a channel seeded from the system clock.
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Channel<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Channel<R> {
    /// Creates a channel that draws from `rng`. Seeded generators make the
    /// flipped positions reproducible.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Sends the low `width` bits of `input` through the channel.
    ///
    /// For each position in `0..width` a uniform value in `[0, 1)` is drawn
    /// and the bit is flipped when the draw is below `p`. With `p = 0` nothing
    /// changes; with `p = 1` all `width` bits flip. `width` is capped at 64.
    ///
    /// # Arguments
    ///
    /// * `input` - Vector to transmit
    /// * `width` - Number of low bits exposed to noise
    /// * `p` - Probability of flipping each bit
    ///
    /// # Returns
    ///
    /// The vector as received
    ///
    /// # Examples
    ///
    /// ```
    /// use lincode::ecc::Channel;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut channel = Channel::with_rng(ChaCha8Rng::seed_from_u64(1));
    /// assert_eq!(channel.send_vector(0b1011, 4, 0.0), 0b1011);
    /// assert_eq!(channel.send_vector(0b1011, 4, 1.0), 0b0100);
    /// ```
    pub fn send_vector(&mut self, input: Vector, width: usize, p: f64) -> Vector {
        let mut out = input;
        for i in 0..width.min(MAX_DIM) {
            if self.rng.gen::<f64>() < p {
                out ^= 1 << i;
            }
        }
        out
    }

    /// Sends every vector in `inputs`, in order.
    pub fn send_vectors(&mut self, inputs: &[Vector], width: usize, p: f64) -> Vec<Vector> {
        inputs
            .iter()
            .map(|&v| self.send_vector(v, width, p))
            .collect()
    }

    /// Gives back the underlying generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}
