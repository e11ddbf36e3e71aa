//! Randomness port. Drives the draw; adapters decide where entropy comes from.

/// Source of uniformly distributed indices.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..upper`. `upper` is always at least 1.
    fn random_index(&self, upper: usize) -> usize;
}
