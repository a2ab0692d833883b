//! Model constants and runtime configuration defaults

/// Side length of extracted square patterns
pub const DEFAULT_PATTERN_SIZE: usize = 3;

/// Initial accumulator for the pattern content hash
pub const PATTERN_HASH_SEED: u32 = 0x1656_67B1;

/// Number of cardinal directions tracked per tile
pub const DIRECTION_COUNT: usize = 4;

/// Chebyshev radius of the resident window around the reference cell
pub const DEFAULT_RADIUS: u32 = 4;

/// World offset subtracted from every window coordinate
pub const DEFAULT_GRID_START: [i32; 2] = [0, 0];

/// Fixed seed for reproducible prototype selection and walks
pub const DEFAULT_SEED: u64 = 42;

// Walk simulation defaults, in world units
/// Distance covered per second by the simulated reference point
pub const DEFAULT_MOVE_SPEED: f64 = 5.0;
/// Height the reference point is clamped to
pub const DEFAULT_FLOOR_Y: f64 = -2.0;
/// Seconds elapsed per simulated step
pub const DEFAULT_TIME_STEP: f64 = 1.0 / 60.0;
/// Number of simulated steps when none are requested
pub const DEFAULT_WALK_STEPS: usize = 0;
/// Steps the walker keeps its heading before picking a new one
pub const WALK_HEADING_STEPS: usize = 30;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to tile atlas filenames
pub const ATLAS_SUFFIX: &str = "_tiles";
/// Transparent gutter between tiles in the atlas, in pixels
pub const ATLAS_GUTTER: u32 = 1;
/// Maximum number of tiles per atlas row
pub const ATLAS_COLUMNS: usize = 16;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn,motifstream=info";
/// Log filter used with `--quiet`
pub const QUIET_LOG_FILTER: &str = "error";

/// Runtime parameters of the streaming window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamingConfig {
    /// Chebyshev radius of the resident window
    pub radius: u32,
    /// Offset subtracted from every window coordinate
    pub grid_start: [i32; 2],
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            grid_start: DEFAULT_GRID_START,
        }
    }
}

impl StreamingConfig {
    /// Create a configuration with the given radius and grid start
    pub const fn new(radius: u32, grid_start: [i32; 2]) -> Self {
        Self { radius, grid_start }
    }

    /// Number of cells resident once the window is fully populated
    pub const fn window_cell_count(&self) -> usize {
        let side = 2 * self.radius as usize + 1;
        side * side
    }

    /// Reject radii whose window cannot be addressed with `i32` coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if the radius exceeds `i32::MAX / 2`
    pub fn validate(&self) -> crate::io::error::Result<()> {
        if self.radius > (i32::MAX / 2) as u32 {
            return Err(crate::io::error::invalid_parameter(
                "radius",
                &self.radius,
                &"window would overflow grid coordinates",
            ));
        }
        Ok(())
    }
}
