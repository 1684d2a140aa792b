//! Multi-file progress tracking with automatic batching for large sets

use crate::algorithm::executor::RunObserver;
use crate::algorithm::wave::WaveState;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Display state of one input file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FileState {
    name: String,
    collapsed: usize,
    cells: usize,
    attempt: usize,
}

/// Coordinates progress display for batch operations
///
/// Automatically switches between individual progress bars (for small batches)
/// and a single batch progress bar (for large batches) based on file count.
/// Each file bar counts collapsed cells out of the output's cell count.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_count: 0,
            file_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of files announced by [`Self::initialize`]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Configure progress bar for a new file whose output has `cells` cells
    pub fn start_file(&mut self, index: usize, path: &Path, cells: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                collapsed: 0,
                cells,
                attempt: 1,
            };
        }
        self.update_bars();
    }

    /// Reset a file's bar for a retry with a new seed
    pub fn start_attempt(&mut self, index: usize, attempt: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.attempt = attempt;
            state.collapsed = 0;
        }
        self.update_bars();
    }

    /// Report how many cells are collapsed so far
    pub fn update_collapsed(&mut self, index: usize, collapsed: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.collapsed = collapsed.min(state.cells);
        }
        self.update_bars();
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize, success: bool) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            let mark = if success { '✓' } else { '✗' };
            state.name = format!("{mark} {}", state.name);
            if success {
                state.collapsed = state.cells;
            }
        }
        self.update_bars();
    }

    /// Collapsed and total cells last reported for a file
    pub fn file_progress(&self, index: usize) -> Option<(usize, usize)> {
        self.file_states
            .get(index)
            .map(|state| (state.collapsed, state.cells))
    }

    /// Attempt number last reported for a file
    pub fn file_attempt(&self, index: usize) -> Option<usize> {
        self.file_states.get(index).map(|state| state.attempt)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active files
    fn update_bars(&self) {
        let active_files: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();

        let start_idx = active_files
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_files = active_files.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, state) in visible_files.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(state.cells as u64);
                bar.set_position(state.collapsed as u64);
                let width = state.cells.to_string().len();
                bar.set_message(format!(
                    "{:>width$}/{} #{}",
                    state.collapsed, state.cells, state.attempt
                ));
                bar.set_prefix(state.name.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible_files.len()..self.file_bars.len() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}

/// Run observer that forwards collapsed-cell counts to a file's progress bar
pub struct FileProgress<'a> {
    manager: &'a mut ProgressManager,
    index: usize,
}

impl<'a> FileProgress<'a> {
    /// Observe runs on behalf of file `index`
    pub const fn new(manager: &'a mut ProgressManager, index: usize) -> Self {
        Self { manager, index }
    }
}

impl RunObserver for FileProgress<'_> {
    fn on_iteration(&mut self, _iteration: usize, wave: &WaveState) {
        self.manager
            .update_collapsed(self.index, wave.collapsed_count());
    }
}
