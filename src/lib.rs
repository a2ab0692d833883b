//! Overlapping pattern extraction, directional adjacency rules and a streaming tile window
//!
//! The model side slides a window over a reference image, deduplicates the
//! resulting patterns by content hash and records which tiles may sit next to
//! which. The streaming side keeps a square of grid cells populated around a
//! moving reference point, spawning and destroying instances through a host.

#![forbid(unsafe_code)]

/// Prototype selection and tile index sets
pub mod algorithm;
/// Raster access, pattern extraction and deduplication
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Adjacency graph, grid coordinates and the streaming window
pub mod spatial;

pub use io::error::{ModelError, Result};
