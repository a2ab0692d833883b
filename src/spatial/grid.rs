//! Grid coordinates and the Chebyshev window resident around a reference cell

use num_traits::Float;
use std::collections::HashSet;
use std::fmt;

/// Integer address of one streaming cell on the horizontal plane
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    /// Column along world x
    pub x: i32,
    /// Row along world z
    pub z: i32,
}

impl GridCoord {
    /// The addressable origin
    pub const ORIGIN: Self = Self { x: 0, z: 0 };

    /// Create a coordinate
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing a planar position, rounding towards negative infinity
    ///
    /// Returns `None` for non-finite input or positions beyond `i32` range.
    pub fn from_planar<T: Float>(x: T, z: T) -> Option<Self> {
        Some(Self {
            x: x.floor().to_i32()?,
            z: z.floor().to_i32()?,
        })
    }

    /// Coordinate shifted by `(dx, dz)`
    #[must_use]
    pub const fn offset_by(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            z: self.z.wrapping_add(dz),
        }
    }

    /// Chebyshev distance to another coordinate
    pub const fn chebyshev(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dz = self.z.abs_diff(other.z);
        if dx > dz { dx } else { dz }
    }

    /// Coordinate as an `[x, z]` pair
    pub const fn to_array(self) -> [i32; 2] {
        [self.x, self.z]
    }

    /// World position of this cell's anchor: `(x, 0, z)`
    pub fn world_position(self) -> WorldPosition {
        WorldPosition {
            x: f64::from(self.x),
            y: 0.0,
            z: f64::from(self.z),
        }
    }
}

impl From<[i32; 2]> for GridCoord {
    fn from([x, z]: [i32; 2]) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A 3-D world-space position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPosition {
    /// East-west axis
    pub x: f64,
    /// Vertical axis, ignored by the grid
    pub y: f64,
    /// North-south axis
    pub z: f64,
}

impl WorldPosition {
    /// Create a position
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Grid cell under this position, projected onto x/z
    pub fn grid_cell(self) -> Option<GridCoord> {
        GridCoord::from_planar(self.x, self.z)
    }
}

/// Square of coordinates within a Chebyshev radius of a center cell
///
/// Every coordinate is shifted by `-grid_start` so that a grid starting at
/// `grid_start` is addressed from `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamingWindow {
    /// Reference cell before the grid start shift
    pub center: GridCoord,
    /// Inclusive Chebyshev radius
    pub radius: u32,
    /// Offset subtracted from every coordinate
    pub grid_start: GridCoord,
}

impl StreamingWindow {
    /// Window of `radius` around `center`
    pub const fn new(center: GridCoord, radius: u32, grid_start: GridCoord) -> Self {
        Self {
            center,
            radius,
            grid_start,
        }
    }

    /// Center after the grid start shift
    pub const fn shifted_center(&self) -> GridCoord {
        self.center
            .offset_by(self.grid_start.x.wrapping_neg(), self.grid_start.z.wrapping_neg())
    }

    /// Number of coordinates in the window
    pub const fn len(&self) -> usize {
        let side = 2 * self.radius as usize + 1;
        side * side
    }

    /// A window always holds at least its center
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Test whether a shifted coordinate lies in the window
    pub const fn contains(&self, coord: GridCoord) -> bool {
        self.shifted_center().chebyshev(coord) <= self.radius
    }

    /// Lowest and highest shifted corner of the window
    ///
    /// Returns `None` if any coordinate of the window, or the grid start shift
    /// itself, falls outside the `i32` grid.
    pub fn bounds(&self) -> Option<(GridCoord, GridCoord)> {
        let r = i32::try_from(self.radius).ok()?;
        let x = self.center.x.checked_sub(self.grid_start.x)?;
        let z = self.center.z.checked_sub(self.grid_start.z)?;
        Some((
            GridCoord::new(x.checked_sub(r)?, z.checked_sub(r)?),
            GridCoord::new(x.checked_add(r)?, z.checked_add(r)?),
        ))
    }

    /// Test whether every window coordinate is addressable without wrapping
    pub fn is_addressable(&self) -> bool {
        self.bounds().is_some()
    }

    /// Shifted coordinates, x outer and z inner
    ///
    /// Coordinates wrap at the `i32` edge; check [`Self::is_addressable`] first.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        let r = self.radius as i32;
        let center = self.shifted_center();
        (-r..=r).flat_map(move |dx| (-r..=r).map(move |dz| center.offset_by(dx, dz)))
    }

    /// Shifted coordinates collected into a set
    pub fn required_set(&self) -> HashSet<GridCoord> {
        let mut set = HashSet::with_capacity(self.len());
        set.extend(self.coords());
        set
    }
}
