//! Multi-file progress tracking for streaming walks

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display while walks are simulated over several images
///
/// Shows one bar per image for small batches, and adds a batch bar counting
/// finished images once there are more images than individual bars.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    /// Stores (`filename`, `current_step`, `total_steps`) for rolling window display
    file_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
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

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(STEP_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of files announced in [`ProgressManager::initialize`]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Configure progress for a new file
    pub fn start_file(&mut self, index: usize, path: &Path, steps: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0, steps);
        }
        self.update_bars();
    }

    /// Report the current walk step of a file
    pub fn update_step(&mut self, file_index: usize, step: usize) {
        if let Some(state) = self.file_states.get_mut(file_index) {
            state.1 = step;
        }
        self.update_bars();
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Snapshot of (`filename`, `current_step`, `total_steps`) per started file
    pub fn file_states(&self) -> &[(String, usize, usize)] {
        &self.file_states
    }

    // Show the last N started files on the available bars
    fn update_bars(&self) {
        let active_files: Vec<&(String, usize, usize)> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active_files
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_files = active_files.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, current, total)) in visible_files.iter().copied().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(*total as u64);
                bar.set_position(*current as u64);
                let width = total.to_string().len();
                bar.set_message(format!("{current:>width$}/{total}"));
                bar.set_prefix(name.clone());
            }
        }

        for bar in self.file_bars.iter().skip(visible_files.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
