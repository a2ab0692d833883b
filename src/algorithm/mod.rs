//! Tile index sets and prototype selection

/// Fixed-size bitset for tile and cell index sets
pub mod bitset;
/// Prototype selection strategies for newly required cells
pub mod selection;
