//! Mathematical utilities for the algorithm

/// Entropy and weighted sampling helpers
pub mod probability;
