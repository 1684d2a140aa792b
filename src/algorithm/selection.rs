//! Cell selection and pattern sampling for the observation step

use crate::algorithm::wave::WaveState;
use crate::io::configuration::{ENTROPY_CEILING, ENTROPY_NOISE_SCALE};
use crate::math::probability::weighted_index;
use crate::spatial::grid::OutputGrid;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random source owned by a single run
pub struct RandomSelector {
    rng: StdRng,
    seed: u64,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a selector from a fresh seed drawn from the thread generator
    ///
    /// The seed stays available through [`Self::seed`] so the run can be
    /// replayed.
    pub fn from_fresh_seed() -> Self {
        Self::new(rand::random())
    }

    /// Seed this selector was created from
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `[0, 1)`
    pub fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Index drawn with probability proportional to `weights`
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let random_value = self.next_unit();
        weighted_index(weights, random_value)
    }
}

/// Result of scanning the wave for the next cell to collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellChoice {
    /// An observable cell has no live pattern left
    Contradiction,
    /// No observable cell has more than one live pattern
    AllCollapsed,
    /// Lowest-entropy undecided cell
    Cell(usize),
}

/// Outcome of one observation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// An observable cell ran out of patterns
    Contradiction,
    /// Every cell is decided and the wave's observed patterns are recorded
    Converged,
    /// `cell` was collapsed to `pattern`; bans await propagation
    Collapsed {
        /// Collapsed cell
        cell: usize,
        /// Surviving pattern
        pattern: usize,
    },
}

/// Find the undecided observable cell with the lowest jittered entropy
///
/// Boundary-band cells are skipped. Jitter of at most
/// [`ENTROPY_NOISE_SCALE`] is drawn only for cells that could beat the
/// current minimum, so it breaks ties without reordering distinct entropies.
pub fn find_lowest_entropy_cell(
    wave: &WaveState,
    grid: &OutputGrid,
    selector: &mut RandomSelector,
) -> CellChoice {
    let mut min = ENTROPY_CEILING;
    let mut argmin = None;

    for cell in 0..wave.cell_count() {
        if grid.is_boundary_cell(cell) {
            continue;
        }

        let amount = wave.live_count(cell);
        if amount == 0 {
            return CellChoice::Contradiction;
        }

        let entropy = wave.entropy(cell);
        if amount > 1 && entropy <= min {
            let noise = ENTROPY_NOISE_SCALE * selector.next_unit();
            if entropy + noise < min {
                min = entropy + noise;
                argmin = Some(cell);
            }
        }
    }

    argmin.map_or(CellChoice::AllCollapsed, CellChoice::Cell)
}

/// Collapse the lowest-entropy cell to one weighted-random live pattern
///
/// The surviving pattern is drawn over live weights only; every other live
/// pattern of the cell is banned. When nothing is left to decide, the wave's
/// observed patterns are recorded instead.
pub fn observe(
    wave: &mut WaveState,
    grid: &OutputGrid,
    selector: &mut RandomSelector,
) -> Observation {
    let cell = match find_lowest_entropy_cell(wave, grid, selector) {
        CellChoice::Contradiction => return Observation::Contradiction,
        CellChoice::AllCollapsed => {
            wave.record_observation();
            return Observation::Converged;
        }
        CellChoice::Cell(cell) => cell,
    };

    let live: Vec<usize> = wave
        .possibilities(cell)
        .map(|bits| bits.to_vec())
        .unwrap_or_default();
    let weights: Vec<f64> = live.iter().map(|&pattern| wave.weight(pattern)).collect();

    let chosen = live
        .get(selector.weighted_choice(&weights))
        .copied()
        .unwrap_or(0);

    for &pattern in &live {
        if pattern != chosen {
            wave.ban(cell, pattern);
        }
    }

    Observation::Collapsed {
        cell,
        pattern: chosen,
    }
}
