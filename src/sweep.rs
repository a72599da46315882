//! Error-rate sweep over code parameters and channel error probabilities.
//!
//! For every `(n, k)` pair a random standard-form code is built and every
//! `k`-bit message is sent `2^(max_k - k)` times through a binary symmetric
//! channel at each probability, so all pairs transmit the same number of
//! vectors. Pairs run in parallel, each with its own seeded generator, so a
//! sweep is reproducible for a given seed.

use crate::ecc::{Channel, CodeParams, LinearCode};
use crate::error::{Error, Result};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fmt::Write as _;
use std::io::Write;
use std::time::{Duration, Instant};

/// Channel error probabilities swept by default.
pub const DEFAULT_PROBABILITIES: [f64; 8] = [0.01, 0.02, 0.05, 0.1, 0.15, 0.25, 0.4, 0.5];

/// Largest `n - k` the sweep builds a syndrome table for. Tables hold
/// `2^(n - k)` entries and pairs run concurrently, so this keeps each one at
/// 1 MiB.
pub const MAX_SWEEP_REDUNDANCY: usize = 20;

/// Configuration for [`run_sweep`].
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Code lengths `2..max_n` are swept
    pub max_n: usize,
    /// Code dimensions `1..max_k` are swept
    pub max_k: usize,
    /// Channel error probabilities
    pub probabilities: Vec<f64>,
    /// Base seed; each `(n, k)` pair derives its own generator from it
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_n: 12,
            max_k: 8,
            probabilities: DEFAULT_PROBABILITIES.to_vec(),
            seed: 0,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        // the widest swept pair is (max_n - 1, 1)
        let limit = MAX_SWEEP_REDUNDANCY + 2;
        if self.max_n < 3 || self.max_n > limit {
            return Err(Error::invalid_input(format!(
                "max_n = {} must be in [3, {}]",
                self.max_n, limit
            )));
        }
        if self.max_k < 2 || self.max_k > 24 {
            return Err(Error::invalid_input(format!(
                "max_k = {} must be in [2, 24]",
                self.max_k
            )));
        }
        if let Some(p) = self
            .probabilities
            .iter()
            .find(|p| !(0.0..=1.0).contains(*p))
        {
            return Err(Error::invalid_input(format!(
                "probability {} is outside [0, 1]",
                p
            )));
        }
        Ok(())
    }

    /// All `(n, k)` pairs the sweep visits: `k < n` and
    /// `n - k <= MAX_SWEEP_REDUNDANCY`.
    pub fn pairs(&self) -> Vec<CodeParams> {
        (2..self.max_n)
            .flat_map(|n| (1..n.min(self.max_k)).map(move |k| CodeParams { n, k }))
            .filter(|p| p.redundancy() <= MAX_SWEEP_REDUNDANCY)
            .collect()
    }
}

/// Decoding outcome at one channel error probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityOutcome {
    pub p: f64,
    pub vectors: u64,
    pub errors: u64,
}

impl ProbabilityOutcome {
    /// Fraction of vectors decoded to the sent message.
    pub fn success_rate(&self) -> f64 {
        if self.vectors == 0 {
            return 1.0;
        }
        1.0 - self.errors as f64 / self.vectors as f64
    }
}

/// Result of sweeping one `(n, k)` pair.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub params: CodeParams,
    /// Covering radius of the random code
    pub max_weight: u8,
    pub table_time: Duration,
    pub run_time: Duration,
    pub outcomes: Vec<ProbabilityOutcome>,
}

impl SweepResult {
    pub fn vectors(&self) -> u64 {
        self.outcomes.iter().map(|o| o.vectors).sum()
    }

    pub fn errors(&self) -> u64 {
        self.outcomes.iter().map(|o| o.errors).sum()
    }

    /// Fraction of all transmitted vectors decoded incorrectly.
    pub fn error_rate(&self) -> f64 {
        let vectors = self.vectors();
        if vectors == 0 {
            return 0.0;
        }
        self.errors() as f64 / vectors as f64
    }
}

/// Sweeps one `(n, k)` pair with a random code drawn from `rng`.
pub fn run_single(
    params: CodeParams,
    max_k: usize,
    probabilities: &[f64],
    rng: &mut ChaCha8Rng,
) -> Result<SweepResult> {
    params.validate()?;
    if params.k > max_k {
        return Err(Error::invalid_input(format!(
            "k = {} exceeds max_k = {}",
            params.k, max_k
        )));
    }
    if params.redundancy() > MAX_SWEEP_REDUNDANCY {
        return Err(Error::invalid_input(format!(
            "n - k = {} exceeds the sweep limit of {}",
            params.redundancy(),
            MAX_SWEEP_REDUNDANCY
        )));
    }

    let table_start = Instant::now();
    let code = LinearCode::random(params, rng)?;
    let table_time = table_start.elapsed();

    let mut channel = Channel::with_rng(ChaCha8Rng::seed_from_u64(rng.gen()));
    let repeats = 1u64 << (max_k - params.k);

    let run_start = Instant::now();
    let outcomes = probabilities
        .iter()
        .map(|&p| {
            let mut outcome = ProbabilityOutcome {
                p,
                vectors: 0,
                errors: 0,
            };
            for message in 0..(1u64 << params.k) {
                let codeword = code.encode(message);
                for _ in 0..repeats {
                    let received = channel.send_vector(codeword, params.n, p);
                    if code.decode(received) != message {
                        outcome.errors += 1;
                    }
                    outcome.vectors += 1;
                }
            }
            outcome
        })
        .collect();

    let result = SweepResult {
        params,
        max_weight: code.syndrome_table().max_weight(),
        table_time,
        run_time: run_start.elapsed(),
        outcomes,
    };
    info!(
        "n = {}, k = {}: {} vectors tested, error rate {:.4}",
        params.n,
        params.k,
        result.vectors(),
        result.error_rate()
    );
    Ok(result)
}

/// Runs the whole sweep described by `config`, in parallel over `(n, k)`.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SweepResult>> {
    config.validate()?;
    config
        .pairs()
        .into_par_iter()
        .map(|params| {
            let stream = ((params.n as u64) << 8) | params.k as u64;
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed ^ stream);
            run_single(params, config.max_k, &config.probabilities, &mut rng)
        })
        .collect()
}

/// Renders error percentages as an `N x K` grid; `-` marks pairs not swept.
pub fn format_error_grid(results: &[SweepResult], config: &SweepConfig) -> String {
    let mut out = String::from("  # K ");
    for k in 1..config.max_k {
        let _ = write!(out, "{:3} ", k);
    }
    out.push_str("\n  N |");
    for _ in 1..config.max_k {
        out.push_str("----");
    }
    out.push('\n');

    for n in 2..config.max_n {
        let _ = write!(out, "{:3} | ", n);
        for k in 1..config.max_k {
            match results
                .iter()
                .find(|r| r.params.n == n && r.params.k == k)
            {
                Some(r) => {
                    let _ = write!(out, "{:3} ", (r.error_rate() * 100.0).round() as u32);
                }
                None => out.push_str("  - "),
            }
        }
        out.push('\n');
    }
    out
}

/// Writes a `;`-delimited report, one line per `(n, k, p)`.
pub fn write_report<W: Write>(results: &[SweepResult], mut writer: W) -> Result<()> {
    writeln!(
        writer,
        "n;k;p;vectors;errors;success_rate;covering_radius;table_ms;run_ms"
    )?;
    for r in results {
        for o in &r.outcomes {
            writeln!(
                writer,
                "{};{};{};{};{};{:.6};{};{:.3};{:.3}",
                r.params.n,
                r.params.k,
                o.p,
                o.vectors,
                o.errors,
                o.success_rate(),
                r.max_weight,
                r.table_time.as_secs_f64() * 1e3,
                r.run_time.as_secs_f64() * 1e3
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}
