//! Pattern extraction and registration from reference rasters

/// Seeded content hash for pattern identity
pub mod hashing;
/// Sliding-window pattern extraction
pub mod patterns;
/// Read-only pixel grids
pub mod raster;
/// Hash-keyed pattern deduplication
pub mod registry;
