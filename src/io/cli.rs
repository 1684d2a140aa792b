//! Command-line interface for batch processing PNG exemplars

use crate::algorithm::executor::{GenerationReport, OverlappingModel};
use crate::io::configuration::{
    DEFAULT_GROUND, DEFAULT_ITERATION_LIMIT, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_HEIGHT,
    DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE, DEFAULT_SYMMETRY, ModelConfig, OUTPUT_SUFFIX,
    RunConfig, TRACE_INTERVAL,
};
use crate::io::error::{Result, WfcError, invalid_target};
use crate::io::image::{load_exemplar, save_bitmap, scale_bitmap};
use crate::io::progress::{FileProgress, ProgressManager};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "overtile")]
#[command(
    author,
    version,
    about = "Generate images that locally resemble an exemplar with the overlapping wave function collapse model"
)]
/// Command-line arguments for the generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Side length of the sampled N×N patterns
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Output width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Wrap exemplar sampling at the edges
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub periodic_input: bool,

    /// Wrap the output at the edges
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub periodic_output: bool,

    /// Symmetry variants sampled per origin (1-8)
    #[arg(short = 'y', long, default_value_t = DEFAULT_SYMMETRY)]
    pub symmetry: usize,

    /// Pattern forced along the bottom row (0 leaves it free)
    #[arg(short, long, default_value_t = DEFAULT_GROUND, allow_negative_numbers = true)]
    pub ground: i64,

    /// Maximum observe/propagate iterations (0 = unbounded)
    #[arg(short, long, default_value_t = DEFAULT_ITERATION_LIMIT)]
    pub limit: usize,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Retry with new seeds until a run succeeds
    #[arg(short, long)]
    pub force: bool,

    /// Attempts made in force mode before giving up on a file
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Scale the saved image to this width in pixels
    #[arg(long)]
    pub scale_width: Option<usize>,

    /// Scale the saved image to this height in pixels
    #[arg(long)]
    pub scale_height: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Model parameters selected on the command line
    pub const fn model_config(&self) -> ModelConfig {
        ModelConfig {
            pattern_size: self.pattern_size,
            output_width: self.width,
            output_height: self.height,
            periodic_input: self.periodic_input,
            periodic_output: self.periodic_output,
            symmetry: self.symmetry,
            ground: self.ground,
        }
    }

    /// Run parameters for the given 1-based attempt
    ///
    /// An explicit seed is offset by the attempt number so retries explore
    /// new runs while staying reproducible.
    pub fn run_config(&self, attempt: usize) -> RunConfig {
        let offset = attempt.saturating_sub(1) as u64;
        RunConfig {
            seed: self.seed.map(|seed| seed.wrapping_add(offset)),
            iteration_limit: self.limit,
            trace_interval: TRACE_INTERVAL,
        }
    }

    /// Number of runs allowed per file
    pub fn attempts(&self) -> usize {
        if self.force {
            self.max_attempts.max(1)
        } else {
            1
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_target("target file must be a PNG image"));
            }
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| WfcError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_png(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target("target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback when every attempt fails
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let exemplar = load_exemplar(input_path)?;
        let model = OverlappingModel::new(&exemplar, self.cli.model_config())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, model.grid().len());
        }

        let attempts = self.cli.attempts();
        let mut last: Option<GenerationReport> = None;
        for attempt in 1..=attempts {
            let settings = self.cli.run_config(attempt);
            let report = match self.progress_manager {
                Some(ref mut pm) => {
                    pm.start_attempt(index, attempt);
                    let mut observer = FileProgress::new(pm, index);
                    model.generate_with_observer(&settings, &mut observer)
                }
                None => model.generate(&settings),
            };

            let success = report.success;
            last = Some(report);
            if success {
                break;
            }
        }

        let Some(report) = last else {
            return Ok(());
        };

        if !report.success && !self.cli.quiet {
            eprintln!(
                "Warning: {} did not converge after {attempts} attempt(s) (last outcome {:?}, seed {})",
                input_path.display(),
                report.outcome,
                report.seed
            );
        }

        let bitmap = match (self.cli.scale_width, self.cli.scale_height) {
            (None, None) => report.bitmap,
            (width, height) => {
                scale_bitmap(&report.bitmap, width.unwrap_or(0), height.unwrap_or(0))
            }
        };
        save_bitmap(&bitmap, &output_path(input_path))?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, report.success);
        }

        Ok(())
    }
}

/// Output file written next to an input: `<stem>_wfc.<ext>`
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

// Outputs of an earlier batch are not exemplars
fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
