//! Tuning constants and analyzer configuration.
//!
//! Container growth policies are compile-time constants; PageRank parameters
//! are carried at runtime in [`PageRankConfig`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of buckets a fresh `ChainedHashMap` starts with.
pub const INITIAL_TABLE_SIZE: usize = 10;

/// Integer load factor (`len / table_size`) above which the bucket table doubles.
///
/// The division truncates, so a table of size `n` grows once it holds `2n` pairs.
pub const MAX_LOAD_FACTOR: usize = 1;

/// Children per node in `ArrayHeap`.
pub const HEAP_FAN_OUT: usize = 4;

/// Slots a fresh `ArrayHeap` reserves before its first doubling.
pub const INITIAL_HEAP_CAPACITY: usize = 8;

/// Probability that the random surfer follows an outbound link.
pub const DEFAULT_DECAY: f64 = 0.85;

/// PageRank stops once no rank moves by this much or more in one iteration.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Upper bound on PageRank iterations.
pub const DEFAULT_ITERATION_LIMIT: usize = 100;

/// Parameters of a PageRank run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Decay (damping) factor in `[0, 1]`.
    pub decay: f64,
    /// Convergence threshold on the maximum per-page rank change.
    pub epsilon: f64,
    /// Maximum number of iterations.
    pub limit: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            decay: DEFAULT_DECAY,
            epsilon: DEFAULT_EPSILON,
            limit: DEFAULT_ITERATION_LIMIT,
        }
    }
}

impl PageRankConfig {
    pub fn new(decay: f64, epsilon: f64, limit: usize) -> Self {
        Self { decay, epsilon, limit }
    }

    /// Check that `decay` is a probability and `epsilon` a usable threshold.
    pub fn validate(&self) -> Result<()> {
        if !self.decay.is_finite() || !(0.0..=1.0).contains(&self.decay) {
            return Err(Error::InvalidArgument("decay must lie in [0, 1]"));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::InvalidArgument("epsilon must be finite and non-negative"));
        }
        Ok(())
    }
}
