//! Seeded reference-point walker used to drive streaming without a host engine

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io::configuration::{
    DEFAULT_FLOOR_Y, DEFAULT_MOVE_SPEED, DEFAULT_TIME_STEP, WALK_HEADING_STEPS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::WorldPosition;

/// Movement parameters of the walker
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkConfig {
    /// Distance per second
    pub move_speed: f64,
    /// Height the walker is clamped to every step
    pub floor_y: f64,
    /// Seconds per step
    pub time_step: f64,
    /// Steps between heading changes
    pub heading_steps: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            floor_y: DEFAULT_FLOOR_Y,
            time_step: DEFAULT_TIME_STEP,
            heading_steps: WALK_HEADING_STEPS,
        }
    }
}

// Unit planar headings, including standing still
const HEADINGS: [(f64, f64); 5] = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0), (0.0, 0.0)];

/// Infinite iterator of reference positions
///
/// The walker holds a heading for `heading_steps` steps, advancing
/// `move_speed * time_step` along it each step, then draws a new heading.
#[derive(Debug, Clone)]
pub struct WalkPath {
    config: WalkConfig,
    rng: StdRng,
    position: WorldPosition,
    heading: (f64, f64),
    steps_left: usize,
}

impl WalkPath {
    /// Create a walker starting at `start`
    ///
    /// # Errors
    ///
    /// Returns an error if speed or time step is negative or not finite
    pub fn new(start: WorldPosition, config: WalkConfig, seed: u64) -> Result<Self> {
        if !config.move_speed.is_finite() || config.move_speed < 0.0 {
            return Err(invalid_parameter(
                "move_speed",
                &config.move_speed,
                &"must be finite and non-negative",
            ));
        }
        if !config.time_step.is_finite() || config.time_step < 0.0 {
            return Err(invalid_parameter(
                "time_step",
                &config.time_step,
                &"must be finite and non-negative",
            ));
        }

        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            position: WorldPosition::new(start.x, config.floor_y, start.z),
            heading: (0.0, 0.0),
            steps_left: 0,
        })
    }

    /// Position the next step starts from
    pub const fn position(&self) -> WorldPosition {
        self.position
    }
}

impl Iterator for WalkPath {
    type Item = WorldPosition;

    fn next(&mut self) -> Option<WorldPosition> {
        if self.steps_left == 0 {
            let choice = self.rng.random_range(0..HEADINGS.len());
            self.heading = HEADINGS.get(choice).copied().unwrap_or((0.0, 0.0));
            self.steps_left = self.config.heading_steps.max(1);
        }
        self.steps_left -= 1;

        let distance = self.config.move_speed * self.config.time_step;
        self.position.x = self.heading.0.mul_add(distance, self.position.x);
        self.position.z = self.heading.1.mul_add(distance, self.position.z);
        self.position.y = self.config.floor_y;

        Some(self.position)
    }
}
