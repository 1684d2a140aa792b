//! Mutable solver state: possibilities, cached statistics and support counts
//!
//! Every output cell keeps a bitset of live patterns together with the sums
//! needed to read its entropy in O(1). A (cell, pattern, direction) counter
//! records how many compatible patterns remain in the neighbour on the other
//! side; propagation bans a pattern as soon as one of its counters hits zero.

use crate::algorithm::bitset::PatternBitset;
use crate::math::probability::{entropy_from_sums, weight_log_weight};
use crate::spatial::adjacency::{AdjacencyTable, Direction};
use crate::spatial::grid::OutputGrid;
use ndarray::{Array2, Array3};

/// Aggregate statistics of a fully undecided cell, computed once per wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartingStatistics {
    /// Sum of every pattern weight
    pub sum_of_weights: f64,
    /// Sum of `w ln w` over every pattern
    pub sum_of_weight_log_weights: f64,
    /// Entropy of the unconstrained weight distribution
    pub entropy: f64,
}

/// Wave of per-cell pattern possibilities kept in arc consistency
///
/// Owned by exactly one run. Bans push onto an internal stack that
/// [`crate::algorithm::propagation::propagate`] drains.
#[derive(Debug, Clone)]
pub struct WaveState {
    possibilities: Vec<PatternBitset>,
    live_counts: Vec<usize>,
    sums_of_weights: Vec<f64>,
    sums_of_weight_log_weights: Vec<f64>,
    entropies: Vec<f64>,
    /// Shape `(cells, patterns, 4)`
    compatible: Array3<usize>,
    stack: Vec<(usize, usize)>,
    contradiction: bool,
    observed: Option<Vec<usize>>,
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
    starting: StartingStatistics,
}

impl WaveState {
    /// Allocate a wave for `cell_count` cells over patterns with the given
    /// occurrence weights
    ///
    /// The wave starts fully undecided but with zeroed support counters;
    /// call [`Self::clear`] before running.
    pub fn new(cell_count: usize, pattern_weights: &[usize]) -> Self {
        let pattern_count = pattern_weights.len();
        let weights: Vec<f64> = pattern_weights.iter().map(|&w| w as f64).collect();
        let weight_log_weights: Vec<f64> = weights.iter().map(|&w| weight_log_weight(w)).collect();

        let sum_of_weights: f64 = weights.iter().sum();
        let sum_of_weight_log_weights: f64 = weight_log_weights.iter().sum();
        let starting = StartingStatistics {
            sum_of_weights,
            sum_of_weight_log_weights,
            entropy: entropy_from_sums(sum_of_weights, sum_of_weight_log_weights),
        };

        Self {
            possibilities: vec![PatternBitset::all(pattern_count); cell_count],
            live_counts: vec![pattern_count; cell_count],
            sums_of_weights: vec![sum_of_weights; cell_count],
            sums_of_weight_log_weights: vec![sum_of_weight_log_weights; cell_count],
            entropies: vec![starting.entropy; cell_count],
            compatible: Array3::zeros((cell_count, pattern_count, Direction::ALL.len())),
            stack: Vec::with_capacity(cell_count * pattern_count),
            contradiction: false,
            observed: None,
            weights,
            weight_log_weights,
            starting,
        }
    }

    /// Reset every cell to all-live with support counts from the adjacency table
    ///
    /// The counter for (pattern `t`, direction `d`) starts at the number of
    /// patterns compatible with `t` in the opposite direction.
    pub fn clear(&mut self, adjacency: &AdjacencyTable) {
        let pattern_count = self.pattern_count();
        let template = Array2::from_shape_fn((pattern_count, Direction::ALL.len()), |(t, d)| {
            Direction::ALL
                .get(d)
                .map_or(0, |direction| adjacency.compatible(direction.opposite(), t).len())
        });

        for mut cell in self.compatible.outer_iter_mut() {
            cell.assign(&template);
        }

        for bits in &mut self.possibilities {
            bits.fill(true);
        }
        self.live_counts.fill(pattern_count);
        self.sums_of_weights.fill(self.starting.sum_of_weights);
        self.sums_of_weight_log_weights
            .fill(self.starting.sum_of_weight_log_weights);
        self.entropies.fill(self.starting.entropy);

        self.stack.clear();
        self.contradiction = false;
        self.observed = None;
    }

    /// Ban every pattern that starts with no possible neighbour on some side
    ///
    /// A counter that begins at zero never steps from one to zero, so
    /// propagation alone would leave such a pattern live. Only observable
    /// cells are pruned, and only against neighbours propagation links them
    /// to. The bans are queued; propagate afterwards.
    pub fn ban_unsupported(&mut self, grid: &OutputGrid) {
        for cell in 0..self.cell_count() {
            if grid.is_boundary_cell(cell) {
                continue;
            }

            for direction in Direction::ALL {
                // Support counted under `direction` comes from the opposite side
                if grid.neighbor(cell, direction.opposite()).is_none() {
                    continue;
                }

                for pattern in 0..self.pattern_count() {
                    if self.is_possible(cell, pattern)
                        && self.compatible_count(cell, pattern, direction) == 0
                    {
                        self.ban(cell, pattern);
                    }
                }
            }
        }
    }

    /// Remove `pattern` from `cell` and queue the ban for propagation
    ///
    /// Decrements the cell's cached sums and recomputes its entropy. Banning
    /// a pattern that is already gone does nothing. Emptying a cell raises
    /// the contradiction flag.
    pub fn ban(&mut self, cell: usize, pattern: usize) {
        let Some(bits) = self.possibilities.get_mut(cell) else {
            return;
        };
        if !bits.remove(pattern) {
            return;
        }

        for d in 0..Direction::ALL.len() {
            if let Some(count) = self.compatible.get_mut([cell, pattern, d]) {
                *count = 0;
            }
        }

        self.stack.push((cell, pattern));

        let weight = self.weights.get(pattern).copied().unwrap_or(0.0);
        let weight_log_weight = self.weight_log_weights.get(pattern).copied().unwrap_or(0.0);

        if let Some(live) = self.live_counts.get_mut(cell) {
            *live = live.saturating_sub(1);
            if *live == 0 {
                self.contradiction = true;
            }
        }

        let mut sum = 0.0;
        if let Some(sum_of_weights) = self.sums_of_weights.get_mut(cell) {
            *sum_of_weights -= weight;
            sum = *sum_of_weights;
        }
        let mut log_sum = 0.0;
        if let Some(sum_of_weight_log_weights) = self.sums_of_weight_log_weights.get_mut(cell) {
            *sum_of_weight_log_weights -= weight_log_weight;
            log_sum = *sum_of_weight_log_weights;
        }
        if let Some(entropy) = self.entropies.get_mut(cell) {
            *entropy = entropy_from_sums(sum, log_sum);
        }
    }

    /// Take one support away from `pattern` in `cell` for `direction`
    ///
    /// Returns true exactly when the counter drops from one to zero, i.e.
    /// the pattern has just lost its last compatible neighbour and must be
    /// banned. Counters already at zero stay there.
    pub fn weaken_support(&mut self, cell: usize, pattern: usize, direction: Direction) -> bool {
        match self.compatible.get_mut([cell, pattern, direction.index()]) {
            Some(count) if *count > 0 => {
                *count -= 1;
                *count == 0
            }
            _ => false,
        }
    }

    /// Next pending ban, most recent first
    pub fn pop_pending(&mut self) -> Option<(usize, usize)> {
        self.stack.pop()
    }

    /// Number of bans not yet propagated
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Fix every cell to its lowest live pattern
    ///
    /// Called once no observable cell has more than one possibility left.
    pub fn record_observation(&mut self) {
        self.observed = Some(
            self.possibilities
                .iter()
                .map(|bits| bits.first().unwrap_or(0))
                .collect(),
        );
    }

    /// Pattern per cell once the wave has converged
    pub fn observed(&self) -> Option<&[usize]> {
        self.observed.as_deref()
    }

    /// Whether some cell ran out of patterns
    pub const fn is_contradiction(&self) -> bool {
        self.contradiction
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.possibilities.len()
    }

    /// Number of patterns (T)
    pub fn pattern_count(&self) -> usize {
        self.weights.len()
    }

    /// Live patterns of a cell
    pub fn possibilities(&self, cell: usize) -> Option<&PatternBitset> {
        self.possibilities.get(cell)
    }

    /// Whether `pattern` is still live in `cell`
    pub fn is_possible(&self, cell: usize, pattern: usize) -> bool {
        self.possibilities
            .get(cell)
            .is_some_and(|bits| bits.contains(pattern))
    }

    /// Number of live patterns in a cell
    pub fn live_count(&self, cell: usize) -> usize {
        self.live_counts.get(cell).copied().unwrap_or(0)
    }

    /// Live pattern counts of every cell
    pub fn live_counts(&self) -> &[usize] {
        &self.live_counts
    }

    /// Cached entropy of a cell; meaningless once the cell has one pattern or fewer
    pub fn entropy(&self, cell: usize) -> f64 {
        self.entropies.get(cell).copied().unwrap_or(0.0)
    }

    /// Sum of live pattern weights in a cell
    pub fn sum_of_weights(&self, cell: usize) -> f64 {
        self.sums_of_weights.get(cell).copied().unwrap_or(0.0)
    }

    /// Remaining support of `pattern` in `cell` from `direction`'s opposite side
    pub fn compatible_count(&self, cell: usize, pattern: usize, direction: Direction) -> usize {
        self.compatible
            .get([cell, pattern, direction.index()])
            .copied()
            .unwrap_or(0)
    }

    /// Occurrence weight of a pattern
    pub fn weight(&self, pattern: usize) -> f64 {
        self.weights.get(pattern).copied().unwrap_or(0.0)
    }

    /// Statistics every cell starts from
    pub const fn starting_statistics(&self) -> StartingStatistics {
        self.starting
    }

    /// Number of cells reduced to a single pattern
    pub fn collapsed_count(&self) -> usize {
        self.live_counts.iter().filter(|&&count| count == 1).count()
    }
}
