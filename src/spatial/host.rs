//! Capability set through which the streaming grid creates and destroys instances
//!
//! The grid never touches a scene graph directly. A host owns the spawnable
//! prototypes and turns `(prototype, position)` requests into handles.

use std::collections::{HashMap, HashSet};

use crate::io::error::{ModelError, Result, host_failure};
use crate::spatial::grid::WorldPosition;

/// Instantiates and destroys tile instances on behalf of the streaming grid
pub trait TileHost {
    /// Handle identifying one live instance
    type Handle;

    /// Number of spawnable prototypes
    fn catalogue_len(&self) -> usize;

    /// Create an instance of prototype `index` at `position`
    ///
    /// # Errors
    ///
    /// Returns an error if the prototype cannot be instantiated
    fn instantiate(&mut self, index: usize, position: WorldPosition) -> Result<Self::Handle>;

    /// Destroy a previously instantiated handle
    ///
    /// # Errors
    ///
    /// Returns an error if the handle cannot be destroyed
    fn destroy(&mut self, handle: &Self::Handle) -> Result<()>;
}

/// Handle issued by [`RecordingHost`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// A live instance tracked by [`RecordingHost`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceRecord {
    /// Prototype the instance was created from
    pub prototype: usize,
    /// Where it was placed
    pub position: WorldPosition,
}

/// In-memory host that records every instance it creates
///
/// Used for headless simulation and tests. Instantiation of chosen prototypes
/// can be made to fail, and so can destruction of chosen handles.
#[derive(Debug, Default)]
pub struct RecordingHost {
    catalogue_len: usize,
    next_id: u64,
    live: HashMap<InstanceId, InstanceRecord>,
    failing_prototypes: HashSet<usize>,
    failing_handles: HashSet<InstanceId>,
    total_spawned: usize,
    total_destroyed: usize,
}

impl RecordingHost {
    /// Create a host exposing `catalogue_len` prototypes
    pub fn new(catalogue_len: usize) -> Self {
        Self {
            catalogue_len,
            ..Self::default()
        }
    }

    /// Make instantiation of `prototype` fail until cleared
    pub fn fail_prototype(&mut self, prototype: usize) {
        self.failing_prototypes.insert(prototype);
    }

    /// Make destruction of `handle` fail until cleared
    pub fn fail_destroy(&mut self, handle: InstanceId) {
        self.failing_handles.insert(handle);
    }

    /// Remove all injected failures
    pub fn clear_failures(&mut self) {
        self.failing_prototypes.clear();
        self.failing_handles.clear();
    }

    /// Instances currently alive
    pub const fn live(&self) -> &HashMap<InstanceId, InstanceRecord> {
        &self.live
    }

    /// Number of instances currently alive
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Instances created since construction
    pub const fn total_spawned(&self) -> usize {
        self.total_spawned
    }

    /// Instances destroyed since construction
    pub const fn total_destroyed(&self) -> usize {
        self.total_destroyed
    }
}

impl TileHost for RecordingHost {
    type Handle = InstanceId;

    fn catalogue_len(&self) -> usize {
        self.catalogue_len
    }

    fn instantiate(&mut self, index: usize, position: WorldPosition) -> Result<InstanceId> {
        if index >= self.catalogue_len {
            return Err(ModelError::InvalidTileIndex {
                index,
                max_tiles: self.catalogue_len,
            });
        }
        if self.failing_prototypes.contains(&index) {
            return Err(host_failure(
                "instantiate",
                &format!("prototype {index} is unavailable"),
            ));
        }

        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.live.insert(
            id,
            InstanceRecord {
                prototype: index,
                position,
            },
        );
        self.total_spawned += 1;
        Ok(id)
    }

    fn destroy(&mut self, handle: &InstanceId) -> Result<()> {
        if self.failing_handles.contains(handle) {
            return Err(host_failure(
                "destroy",
                &format!("instance {} is locked", handle.0),
            ));
        }
        if self.live.remove(handle).is_none() {
            return Err(host_failure(
                "destroy",
                &format!("instance {} is not alive", handle.0),
            ));
        }
        self.total_destroyed += 1;
        Ok(())
    }
}
