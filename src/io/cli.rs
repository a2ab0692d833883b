//! Command-line interface for building tile models and simulating streaming walks

use crate::io::configuration::{
    ATLAS_SUFFIX, DEFAULT_GRID_START, DEFAULT_LOG_FILTER, DEFAULT_MOVE_SPEED,
    DEFAULT_PATTERN_SIZE, DEFAULT_RADIUS, DEFAULT_SEED, DEFAULT_WALK_STEPS, QUIET_LOG_FILTER,
    StreamingConfig,
};
use crate::io::error::{Result, path_error};
use crate::io::image::{export_tile_atlas, load_raster};
use crate::io::progress::ProgressManager;
use crate::spatial::adjacency::{Direction, TileModel, build_model};
use crate::spatial::grid::WorldPosition;
use crate::spatial::host::RecordingHost;
use crate::spatial::streaming::StreamingGrid;
use crate::spatial::walk::{WalkConfig, WalkPath};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "motifstream")]
#[command(
    author,
    version,
    about = "Extract tile patterns from images and stream a tile window around a walker"
)]
/// Command-line arguments for the model builder and walk simulation
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Side length of extracted patterns
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Random seed for prototype selection and the walk
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Chebyshev radius of the resident window
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    pub radius: u32,

    /// Grid start offset along x
    #[arg(long, default_value_t = DEFAULT_GRID_START[0], allow_negative_numbers = true)]
    pub grid_start_x: i32,

    /// Grid start offset along z
    #[arg(long, default_value_t = DEFAULT_GRID_START[1], allow_negative_numbers = true)]
    pub grid_start_z: i32,

    /// Number of walk steps to simulate (0 disables the walk)
    #[arg(short = 't', long, default_value_t = DEFAULT_WALK_STEPS)]
    pub steps: usize,

    /// Walker speed in cells per second
    #[arg(long, default_value_t = DEFAULT_MOVE_SPEED)]
    pub move_speed: f64,

    /// Write a PNG atlas of the extracted tiles next to each input
    #[arg(short, long)]
    pub atlas: bool,

    /// Suppress progress output and informational logs
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && self.steps > 0
    }

    /// Default log filter for this invocation
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            QUIET_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }

    /// Streaming window parameters from the arguments
    pub const fn streaming_config(&self) -> StreamingConfig {
        StreamingConfig::new(self.radius, [self.grid_start_x, self.grid_start_z])
    }

    /// Walk parameters from the arguments
    pub fn walk_config(&self) -> WalkConfig {
        WalkConfig {
            move_speed: self.move_speed,
            ..WalkConfig::default()
        }
    }
}

/// Totals gathered over a simulated walk
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Steps simulated
    pub steps: usize,
    /// Instances spawned over the whole walk
    pub spawned: usize,
    /// Instances destroyed over the whole walk
    pub despawned: usize,
    /// Spawn or despawn calls that failed
    pub failures: usize,
    /// Cells resident after the last step
    pub resident: usize,
}

/// Drive a streaming grid along a seeded walk starting at the origin
///
/// The catalogue offered to the grid has one prototype per tile. `on_step` is
/// called after every step with the 1-based step number.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the catalogue is empty,
/// or the walker leaves the addressable grid
pub fn simulate_walk<F: FnMut(usize)>(
    catalogue_len: usize,
    config: StreamingConfig,
    walk: WalkConfig,
    steps: usize,
    seed: u64,
    mut on_step: F,
) -> Result<WalkSummary> {
    let host = RecordingHost::new(catalogue_len);
    let mut grid = StreamingGrid::with_seed(host, config, seed)?;
    let path = WalkPath::new(WorldPosition::default(), walk, seed)?;

    let mut summary = WalkSummary {
        steps,
        ..WalkSummary::default()
    };

    for (step, position) in path.take(steps).enumerate() {
        let report = grid.update(position)?;
        summary.spawned += report.spawned.len();
        summary.despawned += report.despawned.len();
        summary.failures += report.failed_spawns.len() + report.failed_despawns.len();
        on_step(step + 1);
    }

    summary.resident = grid.len();
    Ok(summary)
}

/// Log tile count, frequencies and adjacency edges of a model
pub fn log_model_summary(path: &Path, model: &TileModel) {
    tracing::info!(
        image = %path.display(),
        tiles = model.len(),
        total_frequency = model.total_frequency(),
        collisions = model.collisions(),
        "built tile model"
    );
    for direction in Direction::ALL {
        tracing::info!(
            direction = direction.name(),
            edges = model.edge_count(direction),
            "adjacency"
        );
    }
}

/// Orchestrates model building and walk simulation over PNG files
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
            tracing::warn!(path = %self.cli.target.display(), "no PNG files to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// PNG files named by the target, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a directory,
    /// or the directory cannot be read
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_png(target) {
                Ok(vec![target.clone()])
            } else {
                Err(path_error(target, "Target file must be a PNG image"))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_png(&path) && !is_atlas(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(path_error(target, "Target must be a PNG file or directory"))
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let raster = load_raster(input_path)?;
        let model = build_model(&raster, self.cli.pattern_size)?;
        log_model_summary(input_path, &model);

        if self.cli.atlas {
            let atlas_path = Self::get_atlas_path(input_path);
            export_tile_atlas(&model, &atlas_path)?;
            tracing::info!(atlas = %atlas_path.display(), "wrote tile atlas");
        }

        if self.cli.steps == 0 {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, self.cli.steps);
        }

        let progress = &mut self.progress_manager;
        let summary = simulate_walk(
            model.len(),
            self.cli.streaming_config(),
            self.cli.walk_config(),
            self.cli.steps,
            self.cli.seed,
            |step| {
                if let Some(pm) = progress.as_mut() {
                    pm.update_step(index, step);
                }
            },
        )?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        tracing::info!(
            image = %input_path.display(),
            steps = summary.steps,
            spawned = summary.spawned,
            despawned = summary.despawned,
            failures = summary.failures,
            resident = summary.resident,
            "walk finished"
        );

        Ok(())
    }

    /// Path the tile atlas of `input_path` is written to
    pub fn get_atlas_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let atlas_name = format!("{}{ATLAS_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(atlas_name)
        } else {
            PathBuf::from(atlas_name)
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_atlas(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(ATLAS_SUFFIX))
}
