//! Directional adjacency compatibility between registered tiles
//!
//! Two tiles are compatible in a direction when their pixels agree on every
//! cell of that direction's requirement set. The relation is directional and
//! not assumed symmetric: `B ∈ A.adjacency[d]` says nothing about
//! `A ∈ B.adjacency[opposite(d)]`.
//!
//! Building is O(T² · N²) for T tiles of side N. That is fine for the tens of
//! tiles a small reference image produces; larger catalogues pay the full
//! quadratic cost.

use crate::algorithm::bitset::TileBitset;
use crate::analysis::patterns::Pattern;
use crate::analysis::registry::{PatternRegistry, TileRecord};
use crate::io::configuration::DIRECTION_COUNT;

/// Cardinal direction of a neighbor relative to a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Neighbor above
    Up,
    /// Neighbor below
    Down,
    /// Neighbor to the left
    Left,
    /// Neighbor to the right
    Right,
}

impl Direction {
    /// All directions in storage order
    pub const ALL: [Self; DIRECTION_COUNT] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Direction pointing the other way
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase name for logs and summaries
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Cell indices that must match for compatibility in `direction`
///
/// For a 3×3 pattern:
/// - up: `{0,1,2,3,4,5}` (top two rows)
/// - down: `{3,4,5,6,7,8}` (bottom two rows)
/// - left: `{0,1,2,3,4,5}`
/// - right: `{1,2,4,5,7,8}` (right two columns)
///
/// Left reuses the up set rather than a column set. This mirrors the rule
/// tables the model was designed against and is probably a copy of the up
/// row; it is kept so generated graphs stay comparable.
pub fn requirement_indices(direction: Direction, size: usize) -> TileBitset {
    let cells = size * size;
    let indices: Vec<usize> = match direction {
        Direction::Up | Direction::Left => (0..size.saturating_sub(1) * size).collect(),
        Direction::Down => (size..cells).collect(),
        Direction::Right => (0..size)
            .flat_map(|row| (1..size).map(move |col| row * size + col))
            .collect(),
    };
    TileBitset::from_indices(&indices, cells)
}

/// One value per cardinal direction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerDirection<T> {
    /// Value for [`Direction::Up`]
    pub up: T,
    /// Value for [`Direction::Down`]
    pub down: T,
    /// Value for [`Direction::Left`]
    pub left: T,
    /// Value for [`Direction::Right`]
    pub right: T,
}

impl<T> PerDirection<T> {
    /// Build every slot from its direction
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self {
            up: f(Direction::Up),
            down: f(Direction::Down),
            left: f(Direction::Left),
            right: f(Direction::Right),
        }
    }

    /// Value stored for `direction`
    pub const fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// Mutable value stored for `direction`
    pub const fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// Cell indices where two patterns hold the same pixel
pub fn similarity(a: &Pattern, b: &Pattern) -> TileBitset {
    let cells = a.cell_count().min(b.cell_count());
    let mut similar = TileBitset::new(cells);
    for (index, (pa, pb)) in a.pixels().iter().zip(b.pixels()).enumerate() {
        if pa == pb {
            similar.insert(index);
        }
    }
    similar
}

/// Test whether `b` may sit next to `a` in `direction`
pub fn is_compatible(a: &Pattern, b: &Pattern, direction: Direction) -> bool {
    requirement_indices(direction, a.size()).is_subset(&similarity(a, b))
}

/// A registered tile with its directional adjacency sets
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Content hash
    pub hash: u32,
    /// Pixel block
    pub pattern: Pattern,
    /// Number of raster windows that produced this tile
    pub frequency: usize,
    adjacency: PerDirection<TileBitset>,
}

impl Tile {
    fn from_record(record: TileRecord, tile_count: usize) -> Self {
        Self {
            hash: record.hash,
            pattern: record.pattern,
            frequency: record.frequency,
            adjacency: PerDirection::from_fn(|_| TileBitset::new(tile_count)),
        }
    }

    /// Indices of tiles allowed next to this one in `direction`
    pub const fn adjacent(&self, direction: Direction) -> &TileBitset {
        self.adjacency.get(direction)
    }

    /// Test whether tile `other` may sit next to this one in `direction`
    pub fn allows(&self, direction: Direction, other: usize) -> bool {
        self.adjacent(direction).contains(other)
    }
}

/// Read-only tile catalogue with adjacency filled in
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileModel {
    pattern_size: usize,
    tiles: Vec<Tile>,
    collisions: usize,
}

impl TileModel {
    /// Side length of tile patterns
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Tiles in registry order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `index`
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Test if the catalogue has no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Sum of all tile frequencies
    pub fn total_frequency(&self) -> usize {
        self.tiles.iter().map(|tile| tile.frequency).sum()
    }

    /// Hash collisions merged while registering
    pub const fn collisions(&self) -> usize {
        self.collisions
    }

    /// Number of compatible ordered pairs in `direction`
    pub fn edge_count(&self, direction: Direction) -> usize {
        self.tiles
            .iter()
            .map(|tile| tile.adjacent(direction).count())
            .sum()
    }
}

/// Builds the adjacency graph over a finished registry
#[derive(Clone, Debug)]
pub struct AdjacencyBuilder {
    requirements: PerDirection<TileBitset>,
}

impl AdjacencyBuilder {
    /// Prepare requirement sets for patterns of side `size`
    pub fn new(size: usize) -> Self {
        Self {
            requirements: PerDirection::from_fn(|direction| requirement_indices(direction, size)),
        }
    }

    /// Compare every ordered pair of tiles, the diagonal included
    ///
    /// An empty registry produces an empty model.
    pub fn build(&self, registry: PatternRegistry) -> TileModel {
        let pattern_size = registry.pattern_size();
        let collisions = registry.collisions();
        let records = registry.into_records();
        let tile_count = records.len();

        let mut tiles: Vec<Tile> = records
            .into_iter()
            .map(|record| Tile::from_record(record, tile_count))
            .collect();

        for a in 0..tile_count {
            for b in 0..tile_count {
                let Some(similar) = tiles
                    .get(a)
                    .zip(tiles.get(b))
                    .map(|(ta, tb)| similarity(&ta.pattern, &tb.pattern))
                else {
                    continue;
                };

                let Some(tile) = tiles.get_mut(a) else {
                    continue;
                };
                for direction in Direction::ALL {
                    if self.requirements.get(direction).is_subset(&similar) {
                        tile.adjacency.get_mut(direction).insert(b);
                    }
                }
            }

            if let Some(tile) = tiles.get(a) {
                tracing::trace!(
                    tile = a,
                    up = %tile.adjacent(Direction::Up),
                    down = %tile.adjacent(Direction::Down),
                    left = %tile.adjacent(Direction::Left),
                    right = %tile.adjacent(Direction::Right),
                    "tile adjacency"
                );
            }
        }

        let model = TileModel {
            pattern_size,
            tiles,
            collisions,
        };

        tracing::debug!(
            tiles = model.len(),
            up = model.edge_count(Direction::Up),
            down = model.edge_count(Direction::Down),
            left = model.edge_count(Direction::Left),
            right = model.edge_count(Direction::Right),
            "built adjacency graph"
        );

        model
    }
}

/// Extract, register and connect tiles from a raster in one call
///
/// # Errors
///
/// Returns an error if `pattern_size` is zero
pub fn build_model<R: crate::analysis::raster::RasterSource + ?Sized>(
    raster: &R,
    pattern_size: usize,
) -> crate::io::error::Result<TileModel> {
    let registry = PatternRegistry::from_raster(raster, pattern_size)?;
    Ok(AdjacencyBuilder::new(pattern_size).build(registry))
}
