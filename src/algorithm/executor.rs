use crate::{
    algorithm::propagation::propagate,
    algorithm::render::{Rendering, render},
    algorithm::selection::{Observation, RandomSelector, observe},
    algorithm::wave::WaveState,
    analysis::patterns::PatternVocabulary,
    io::configuration::{ModelConfig, RunConfig},
    io::error::{Result, invalid_configuration},
    spatial::adjacency::AdjacencyTable,
    spatial::bitmap::Bitmap,
    spatial::grid::OutputGrid,
};

/// Receives periodic snapshots of a running wave
///
/// Called every `trace_interval` iterations, starting with iteration 0,
/// before that iteration's observation.
pub trait RunObserver {
    /// Inspect the wave at the start of `iteration`
    fn on_iteration(&mut self, iteration: usize, wave: &WaveState);
}

impl<F: FnMut(usize, &WaveState)> RunObserver for F {
    fn on_iteration(&mut self, iteration: usize, wave: &WaveState) {
        self(iteration, wave);
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every observable cell holds exactly one pattern
    Converged,
    /// Some cell ran out of patterns
    Contradiction,
    /// The iteration limit was reached with cells still undecided
    IterationLimit,
}

impl RunOutcome {
    /// Whether the run ended without a contradiction
    ///
    /// A run stopped by its iteration limit still yields a usable partial
    /// wave.
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Contradiction)
    }
}

/// Final wave of a run and how it got there
#[derive(Debug, Clone)]
pub struct Generation {
    /// Wave as left by the last iteration
    pub wave: WaveState,
    /// Why the run stopped
    pub outcome: RunOutcome,
    /// Seed that reproduces the run
    pub seed: u64,
    /// Completed observe/propagate iterations
    pub iterations: usize,
}

/// Everything a caller needs from one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Output bitmap, best-effort when `success` is false
    pub bitmap: Bitmap,
    /// Whether the run converged and every pixel was determined
    pub success: bool,
    /// Why the run stopped
    pub outcome: RunOutcome,
    /// Seed that reproduces the run
    pub seed: u64,
    /// Completed observe/propagate iterations
    pub iterations: usize,
}

/// Immutable overlapping model: vocabulary, adjacency and output topology
///
/// Built once per exemplar and configuration; every run owns its own wave
/// and random source, so one model can serve any number of runs.
#[derive(Debug, Clone)]
pub struct OverlappingModel {
    config: ModelConfig,
    vocabulary: PatternVocabulary,
    adjacency: AdjacencyTable,
    grid: OutputGrid,
    ground: Option<usize>,
}

impl OverlappingModel {
    /// Sample an exemplar and prepare the model
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid for this exemplar
    /// - The exemplar has no pixels
    pub fn new(exemplar: &Bitmap, config: ModelConfig) -> Result<Self> {
        config.validate(exemplar.width(), exemplar.height())?;
        let vocabulary = PatternVocabulary::extract(
            exemplar,
            config.pattern_size,
            config.symmetry,
            config.periodic_input,
        )?;
        Self::from_vocabulary(vocabulary, config)
    }

    /// Prepare a model around an already extracted vocabulary
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The vocabulary's pattern size differs from the configuration's
    /// - The output dimensions are invalid
    pub fn from_vocabulary(vocabulary: PatternVocabulary, config: ModelConfig) -> Result<Self> {
        if vocabulary.pattern_size() != config.pattern_size {
            return Err(invalid_configuration(
                "pattern_size",
                &config.pattern_size,
                &format!(
                    "vocabulary was extracted with pattern size {}",
                    vocabulary.pattern_size()
                ),
            ));
        }
        config.validate_output()?;

        let adjacency = AdjacencyTable::build(vocabulary.patterns());
        let grid = OutputGrid::new(
            config.output_width,
            config.output_height,
            config.pattern_size,
            config.periodic_output,
        );
        let ground = normalize_ground(config.ground, vocabulary.len());

        Ok(Self {
            config,
            vocabulary,
            adjacency,
            grid,
            ground,
        })
    }

    /// Parameters the model was built from
    pub const fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Extracted patterns, palette and weights
    pub const fn vocabulary(&self) -> &PatternVocabulary {
        &self.vocabulary
    }

    /// Directional compatibility between patterns
    pub const fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }

    /// Output topology
    pub const fn grid(&self) -> &OutputGrid {
        &self.grid
    }

    /// Normalized ground pattern, `None` when the bottom row is unconstrained
    pub const fn ground(&self) -> Option<usize> {
        self.ground
    }

    /// Allocate a cleared wave for this model, ground constraints applied
    ///
    /// Patterns that can never be supported and ground bans are already
    /// propagated; check
    /// [`WaveState::is_contradiction`] before observing.
    pub fn new_wave(&self) -> WaveState {
        let mut wave = WaveState::new(self.grid.len(), self.vocabulary.weights());
        self.clear(&mut wave);
        wave
    }

    /// Reset a wave, prune unsupported patterns and seed the ground row
    fn clear(&self, wave: &mut WaveState) {
        wave.clear(&self.adjacency);
        wave.ban_unsupported(&self.grid);

        let Some(ground) = self.ground else {
            propagate(wave, &self.adjacency, &self.grid);
            return;
        };

        let bottom_row = self.grid.height().saturating_sub(1);
        for x in 0..self.grid.width() {
            let bottom = self.grid.index(x, bottom_row);
            for pattern in 0..self.vocabulary.len() {
                if pattern != ground {
                    wave.ban(bottom, pattern);
                }
            }
            for y in 0..bottom_row {
                wave.ban(self.grid.index(x, y), ground);
            }
        }

        propagate(wave, &self.adjacency, &self.grid);
    }

    /// Run to convergence, contradiction or the iteration limit
    pub fn run(&self, settings: &RunConfig) -> Generation {
        self.run_with_observer(settings, &mut |_: usize, _: &WaveState| {})
    }

    /// Run while reporting progress to `observer`
    ///
    /// Without an explicit seed a fresh one is drawn and returned in the
    /// [`Generation`] so the run can be replayed.
    pub fn run_with_observer(
        &self,
        settings: &RunConfig,
        observer: &mut dyn RunObserver,
    ) -> Generation {
        let mut selector = settings
            .seed
            .map_or_else(RandomSelector::from_fresh_seed, RandomSelector::new);
        let mut wave = self.new_wave();
        let mut iterations = 0;

        let outcome = if wave.is_contradiction() {
            RunOutcome::Contradiction
        } else {
            loop {
                if settings.iteration_limit > 0 && iterations >= settings.iteration_limit {
                    break RunOutcome::IterationLimit;
                }

                if settings.trace_interval > 0 && iterations % settings.trace_interval == 0 {
                    observer.on_iteration(iterations, &wave);
                }

                match observe(&mut wave, &self.grid, &mut selector) {
                    Observation::Contradiction => break RunOutcome::Contradiction,
                    Observation::Converged => break RunOutcome::Converged,
                    Observation::Collapsed { .. } => {}
                }

                propagate(&mut wave, &self.adjacency, &self.grid);
                iterations += 1;

                if wave.is_contradiction() {
                    break RunOutcome::Contradiction;
                }
            }
        };

        Generation {
            wave,
            outcome,
            seed: selector.seed(),
            iterations,
        }
    }

    /// Render a wave of this model without modifying it
    pub fn render(&self, wave: &WaveState) -> Rendering {
        render(wave, &self.vocabulary, &self.grid)
    }

    /// Run once and render the result
    ///
    /// `success` holds only when the run converged and the render
    /// determined every pixel.
    pub fn generate(&self, settings: &RunConfig) -> GenerationReport {
        self.generate_with_observer(settings, &mut |_: usize, _: &WaveState| {})
    }

    /// Run once with an observer and render the result
    pub fn generate_with_observer(
        &self,
        settings: &RunConfig,
        observer: &mut dyn RunObserver,
    ) -> GenerationReport {
        let generation = self.run_with_observer(settings, observer);
        let rendering = self.render(&generation.wave);

        GenerationReport {
            bitmap: rendering.bitmap,
            success: generation.outcome == RunOutcome::Converged && rendering.success,
            outcome: generation.outcome,
            seed: generation.seed,
            iterations: generation.iterations,
        }
    }
}

/// Reduce a ground selector modulo the pattern count
///
/// Returns `None` for pattern 0, which leaves the bottom row unconstrained.
pub fn normalize_ground(ground: i64, pattern_count: usize) -> Option<usize> {
    let modulus = i64::try_from(pattern_count).ok().filter(|&m| m > 0)?;
    usize::try_from(ground.rem_euclid(modulus))
        .ok()
        .filter(|&g| g != 0)
}
