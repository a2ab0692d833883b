//! Streaming grid manager that keeps a square of cells resident around a moving point
//!
//! Each update recomputes the full window from scratch, so the grid converges
//! in one call no matter how far the reference point jumped. Missing cells are
//! spawned first, then cells outside the window are evicted. The two passes
//! touch disjoint coordinates.

use std::collections::HashMap;

use crate::algorithm::selection::{TileSelector, UniformSelector};
use crate::io::configuration::StreamingConfig;
use crate::io::error::{ModelError, Result, WithContext, invalid_parameter};
use crate::spatial::grid::{GridCoord, StreamingWindow, WorldPosition};
use crate::spatial::host::TileHost;

/// What one update changed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Reference cell the window was centered on, before the grid start shift
    pub center: GridCoord,
    /// Cells that received a new instance
    pub spawned: Vec<GridCoord>,
    /// Cells whose instance was destroyed
    pub despawned: Vec<GridCoord>,
    /// Required cells left empty because selection or instantiation failed
    pub failed_spawns: Vec<GridCoord>,
    /// Stale cells kept because their instance could not be destroyed
    pub failed_despawns: Vec<GridCoord>,
}

impl UpdateReport {
    /// Test whether the update spawned and despawned nothing
    pub fn is_noop(&self) -> bool {
        self.spawned.is_empty()
            && self.despawned.is_empty()
            && self.failed_spawns.is_empty()
            && self.failed_despawns.is_empty()
    }

    /// Test whether every host call succeeded
    pub fn is_clean(&self) -> bool {
        self.failed_spawns.is_empty() && self.failed_despawns.is_empty()
    }
}

/// Owns the mapping from grid cell to live instance
///
/// At most one instance exists per cell. Only this manager destroys the
/// instances it spawned; handles are destroyed before their entry is removed.
pub struct StreamingGrid<H: TileHost, S: TileSelector = UniformSelector> {
    host: H,
    selector: S,
    config: StreamingConfig,
    active: HashMap<GridCoord, H::Handle>,
}

impl<H: TileHost> StreamingGrid<H, UniformSelector> {
    /// Create a grid that picks prototypes uniformly at random
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_seed(host: H, config: StreamingConfig, seed: u64) -> Result<Self> {
        Self::new(host, UniformSelector::new(seed), config)
    }
}

impl<H: TileHost, S: TileSelector> StreamingGrid<H, S> {
    /// Create an empty grid
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(host: H, selector: S, config: StreamingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            host,
            selector,
            config,
            active: HashMap::new(),
        })
    }

    /// Window that would be resident for a reference cell
    pub const fn window_for(&self, center: GridCoord) -> StreamingWindow {
        StreamingWindow::new(
            center,
            self.config.radius,
            GridCoord::new(self.config.grid_start[0], self.config.grid_start[1]),
        )
    }

    /// Reconcile resident cells with the window around `position`
    ///
    /// Only the x and z components are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the position has no grid cell (non-finite or out of
    /// range), if its window leaves the `i32` grid, or if the host exposes no
    /// prototypes. In every case nothing is spawned or destroyed.
    pub fn update(&mut self, position: WorldPosition) -> Result<UpdateReport> {
        let center = position.grid_cell().ok_or_else(|| {
            invalid_parameter(
                "reference_position",
                &format!("({}, {}, {})", position.x, position.y, position.z),
                &"has no grid cell",
            )
        })?;
        self.update_cell(center)
    }

    /// Reconcile resident cells with the window around a reference cell
    ///
    /// # Errors
    ///
    /// Returns an error if the host exposes no prototypes or the window around
    /// `center` would leave the `i32` grid. Nothing is spawned or destroyed in
    /// either case.
    pub fn update_cell(&mut self, center: GridCoord) -> Result<UpdateReport> {
        let catalogue_len = self.host.catalogue_len();
        if catalogue_len == 0 {
            return Err(ModelError::EmptyCatalogue);
        }

        let window = self.window_for(center);
        if !window.is_addressable() {
            return Err(invalid_parameter(
                "reference_position",
                &center,
                &"streaming window leaves the addressable grid",
            ));
        }

        let mut report = UpdateReport {
            center,
            ..UpdateReport::default()
        };

        for coord in window.coords() {
            if self.active.contains_key(&coord) {
                continue;
            }
            match self.spawn(coord, catalogue_len) {
                Ok(handle) => {
                    self.active.insert(coord, handle);
                    report.spawned.push(coord);
                }
                Err(error) => {
                    tracing::warn!(%coord, %error, "spawn failed, cell stays empty");
                    report.failed_spawns.push(coord);
                }
            }
        }

        let mut stale: Vec<GridCoord> = self
            .active
            .keys()
            .copied()
            .filter(|&coord| !window.contains(coord))
            .collect();
        stale.sort_unstable();

        for coord in stale {
            self.evict(coord, &mut report);
        }

        tracing::trace!(
            %center,
            spawned = report.spawned.len(),
            despawned = report.despawned.len(),
            resident = self.active.len(),
            "streaming update"
        );

        Ok(report)
    }

    fn spawn(&mut self, coord: GridCoord, catalogue_len: usize) -> Result<H::Handle> {
        let index = self
            .selector
            .select(coord, catalogue_len)
            .at_coordinate(coord.to_array())?;
        let handle = self
            .host
            .instantiate(index, coord.world_position())
            .at_coordinate(coord.to_array())?;
        tracing::trace!(%coord, prototype = index, "spawned");
        Ok(handle)
    }

    fn evict(&mut self, coord: GridCoord, report: &mut UpdateReport) {
        let Some(handle) = self.active.get(&coord) else {
            return;
        };
        match self.host.destroy(handle).at_coordinate(coord.to_array()) {
            Ok(()) => {
                self.active.remove(&coord);
                report.despawned.push(coord);
                tracing::trace!(%coord, "despawned");
            }
            Err(error) => {
                tracing::warn!(%coord, %error, "despawn failed, instance kept");
                report.failed_despawns.push(coord);
            }
        }
    }

    /// Destroy every resident instance
    ///
    /// Cells whose instance cannot be destroyed stay resident and are listed in
    /// `failed_despawns`.
    pub fn clear(&mut self) -> UpdateReport {
        let mut report = UpdateReport::default();
        let mut coords: Vec<GridCoord> = self.active.keys().copied().collect();
        coords.sort_unstable();
        for coord in coords {
            self.evict(coord, &mut report);
        }
        report
    }

    /// Change the window radius, applied on the next update
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is too large to address
    pub fn set_radius(&mut self, radius: u32) -> Result<()> {
        let config = StreamingConfig::new(radius, self.config.grid_start);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Current configuration
    pub const fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// Resident cells and their handles
    pub const fn active(&self) -> &HashMap<GridCoord, H::Handle> {
        &self.active
    }

    /// Test whether a cell currently has an instance
    pub fn is_active(&self, coord: GridCoord) -> bool {
        self.active.contains_key(&coord)
    }

    /// Number of resident cells
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Test if no cell is resident
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Host the grid spawns through
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for hosts that need per-frame upkeep
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
