//! Spatial data structures and the streaming grid
//!
//! This module contains spatial-related functionality including:
//! - Directional adjacency between tiles
//! - Grid coordinates and streaming windows
//! - The host capability set and the streaming grid manager

/// Directional adjacency compatibility and the tile model
pub mod adjacency;
/// Grid coordinates, world positions and Chebyshev windows
pub mod grid;
/// Instance host abstraction and an in-memory host
pub mod host;
/// Streaming grid manager
pub mod streaming;
/// Seeded reference-point walker
pub mod walk;

pub use streaming::StreamingGrid;
