use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over pattern IDs
///
/// One per output cell: a set bit means the pattern is still possible there.
/// Provides O(1) membership testing and removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternBitset {
    bits: BitVec,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn new(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
        }
    }

    /// Create a bitset containing every pattern
    pub fn all(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![1; pattern_count],
        }
    }

    /// Insert a pattern; out-of-range IDs are ignored
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.bits.len() {
            self.bits.set(pattern, true);
        }
    }

    /// Remove a pattern, returning whether it was present
    pub fn remove(&mut self, pattern: usize) -> bool {
        if self.contains(pattern) {
            self.bits.set(pattern, false);
            true
        } else {
            false
        }
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Set every bit to `value`
    pub fn fill(&mut self, value: bool) {
        self.bits.fill(value);
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest pattern ID present
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Pattern IDs present, ascending
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all pattern IDs as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Capacity in patterns
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }
}

impl fmt::Display for PatternBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PatternBitset({} patterns: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
