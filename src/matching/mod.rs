//! Pairing algorithms
//!
//! The matcher itself is a pure function of the input order, the roster and
//! the history. Randomness only enters through the shuffled order.

pub mod greedy;
pub mod shuffle;

// Re-export commonly used types
pub use greedy::{GreedyPairMatcher, PairMatcher};
pub use shuffle::{run_rng, shuffled_order};
