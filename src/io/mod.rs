//! Input/output, configuration and error handling

/// Command-line interface and batch processing
pub mod cli;
/// Constants and runtime configuration
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Raster loading and atlas export
pub mod image;
/// Logging subscriber setup
pub mod logging;
/// Progress display for walk simulation
pub mod progress;
