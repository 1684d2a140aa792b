//! Algorithm constants and runtime configuration defaults

use crate::io::error::{Result, invalid_configuration};
use std::fmt;

/// Side length of sampled patterns
pub const DEFAULT_PATTERN_SIZE: usize = 3;

/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 48;

/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 48;

/// Number of symmetry variants sampled per origin by default
pub const DEFAULT_SYMMETRY: usize = 8;

/// Ground selector that leaves the bottom row unconstrained
pub const DEFAULT_GROUND: i64 = 0;

/// Iteration limit meaning "run until convergence or contradiction"
pub const DEFAULT_ITERATION_LIMIT: usize = 0;

/// Identity plus every reflect/rotate combination of a square
pub const MAX_SYMMETRY: usize = 8;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Observation tuning
/// Scale of the uniform jitter added to cell entropies for tie-breaking
pub const ENTROPY_NOISE_SCALE: f64 = 1e-6;
/// Entropy above which a cell is never chosen for observation
pub const ENTROPY_CEILING: f64 = 1e3;

/// Iterations between observer notifications
pub const TRACE_INTERVAL: usize = 250;

// Retry policy for the command-line caller
/// Attempts made in force mode before giving up on a file
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_wfc";

/// Parameters fixing the pattern vocabulary and the output topology
///
/// Everything here is shared read-only by every run against the same exemplar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelConfig {
    /// Side length N of the sampled N×N patterns
    pub pattern_size: usize,
    /// Output width in cells
    pub output_width: usize,
    /// Output height in cells
    pub output_height: usize,
    /// Whether exemplar sampling wraps at the edges
    pub periodic_input: bool,
    /// Whether the output wraps at the edges
    pub periodic_output: bool,
    /// Number of symmetry variants sampled per origin (1..=8)
    pub symmetry: usize,
    /// Ground pattern selector, normalized modulo the pattern count
    pub ground: i64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            pattern_size: DEFAULT_PATTERN_SIZE,
            output_width: DEFAULT_OUTPUT_WIDTH,
            output_height: DEFAULT_OUTPUT_HEIGHT,
            periodic_input: true,
            periodic_output: true,
            symmetry: DEFAULT_SYMMETRY,
            ground: DEFAULT_GROUND,
        }
    }
}

impl ModelConfig {
    /// Check the parameters against an exemplar of the given size
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if either [`Self::validate_output`] or
    /// [`Self::validate_exemplar`] rejects the parameters.
    pub fn validate(&self, exemplar_width: usize, exemplar_height: usize) -> Result<()> {
        self.validate_output()?;
        self.validate_exemplar(exemplar_width, exemplar_height)
    }

    /// Check the parameters that do not depend on the exemplar
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - The pattern size is zero
    /// - The symmetry count is outside `1..=8`
    /// - An output dimension is zero or above [`MAX_GRID_DIMENSION`]
    /// - The pattern does not fit the output and output is not periodic
    pub fn validate_output(&self) -> Result<()> {
        if self.pattern_size == 0 {
            return Err(invalid_configuration(
                "pattern_size",
                &self.pattern_size,
                &"must be positive",
            ));
        }

        if !(1..=MAX_SYMMETRY).contains(&self.symmetry) {
            return Err(invalid_configuration(
                "symmetry",
                &self.symmetry,
                &format!("must be between 1 and {MAX_SYMMETRY}"),
            ));
        }

        for (parameter, value) in [
            ("output_width", self.output_width),
            ("output_height", self.output_height),
        ] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_configuration(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if !self.periodic_output
            && self.pattern_size > self.output_width.min(self.output_height)
        {
            return Err(invalid_configuration(
                "pattern_size",
                &self.pattern_size,
                &format!(
                    "exceeds the {}x{} output without periodic output",
                    self.output_width, self.output_height
                ),
            ));
        }

        Ok(())
    }

    /// Check that non-periodic sampling fits the exemplar
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the pattern is larger than the
    /// exemplar and input is not periodic.
    pub fn validate_exemplar(&self, exemplar_width: usize, exemplar_height: usize) -> Result<()> {
        if !self.periodic_input && self.pattern_size > exemplar_width.min(exemplar_height) {
            return Err(invalid_configuration(
                "pattern_size",
                &self.pattern_size,
                &format!(
                    "exceeds the {exemplar_width}x{exemplar_height} exemplar without periodic input"
                ),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N={} {}x{} periodic_input={} periodic_output={} symmetry={} ground={}",
            self.pattern_size,
            self.output_width,
            self.output_height,
            self.periodic_input,
            self.periodic_output,
            self.symmetry,
            self.ground
        )
    }
}

/// Per-run parameters: random source, iteration bound and trace cadence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Explicit seed for a reproducible run, or `None` for a fresh one
    pub seed: Option<u64>,
    /// Maximum observe/propagate iterations (0 = unbounded)
    pub iteration_limit: usize,
    /// Iterations between observer notifications (0 = never)
    pub trace_interval: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            trace_interval: TRACE_INTERVAL,
        }
    }
}

impl RunConfig {
    /// Reproducible run with the given seed and no iteration bound
    pub const fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            trace_interval: TRACE_INTERVAL,
        }
    }

    /// Same settings with a different iteration limit
    #[must_use]
    pub const fn with_limit(self, iteration_limit: usize) -> Self {
        Self {
            iteration_limit,
            ..self
        }
    }
}
