//! Prototype selection for newly required cells
//!
//! Selection is a seam: the streaming grid asks a selector for a prototype
//! index and never looks at the adjacency graph itself. The default selector
//! draws uniformly, independent of neighbors.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io::error::{ModelError, Result};
use crate::spatial::grid::GridCoord;

/// Chooses which prototype to spawn at a cell
pub trait TileSelector {
    /// Pick an index in `0..catalogue_len` for `coord`
    ///
    /// # Errors
    ///
    /// Returns an error if `catalogue_len` is zero
    fn select(&mut self, coord: GridCoord, catalogue_len: usize) -> Result<usize>;
}

/// Seeded uniform random selection over the whole catalogue
#[derive(Debug, Clone)]
pub struct UniformSelector {
    rng: StdRng,
}

impl UniformSelector {
    /// Create a deterministic selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TileSelector for UniformSelector {
    fn select(&mut self, _coord: GridCoord, catalogue_len: usize) -> Result<usize> {
        if catalogue_len == 0 {
            return Err(ModelError::EmptyCatalogue);
        }
        Ok(self.rng.random_range(0..catalogue_len))
    }
}

/// Always selects the same prototype
///
/// Useful for hosts with a single prototype and for reproducible tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector(pub usize);

impl TileSelector for FixedSelector {
    fn select(&mut self, _coord: GridCoord, catalogue_len: usize) -> Result<usize> {
        if catalogue_len == 0 {
            return Err(ModelError::EmptyCatalogue);
        }
        if self.0 >= catalogue_len {
            return Err(ModelError::InvalidTileIndex {
                index: self.0,
                max_tiles: catalogue_len,
            });
        }
        Ok(self.0)
    }
}
