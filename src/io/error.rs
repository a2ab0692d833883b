//! Error types and context management for model construction and streaming

use std::fmt;
use std::path::PathBuf;

/// Main error type for all model and streaming operations
#[derive(Debug)]
pub enum ModelError {
    /// Failed to load the reference raster from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source raster doesn't meet model requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The host exposes no spawnable prototypes
    ///
    /// Streaming cannot make progress without at least one prototype, so this
    /// is reported as a configuration error rather than skipped.
    EmptyCatalogue,

    /// Prototype or tile index exceeds the available set
    InvalidTileIndex {
        /// The invalid index
        index: usize,
        /// Number of valid entries
        max_tiles: usize,
    },

    /// The host failed to instantiate or destroy an instance
    HostFailure {
        /// Host operation that failed
        operation: &'static str,
        /// Grid coordinate involved, when known
        coordinate: Option<[i32; 2]>,
        /// Description of the failure
        reason: String,
    },

    /// Failed to save an exported image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyCatalogue => {
                write!(f, "Tile catalogue is empty: nothing can be spawned")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::HostFailure {
                operation,
                coordinate,
                reason,
            } => match coordinate {
                Some([x, z]) => {
                    write!(f, "Host failed to {operation} at ({x}, {z}): {reason}")
                }
                None => write!(f, "Host failed to {operation}: {reason}"),
            },
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for model results
pub type Result<T> = std::result::Result<T, ModelError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Grid coordinate where the error occurred
    pub coordinate: Option<[i32; 2]>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches errors with streaming state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the coordinate context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the coordinate applied
    fn at_coordinate(self, coordinate: [i32; 2]) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<ModelError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only host failures carry positional context
            if let ModelError::HostFailure {
                coordinate,
                operation,
                ..
            } = &mut error
            {
                if let Some(coord) = context.coordinate {
                    *coordinate = Some(coord);
                }
                if let Some(op) = context.operation {
                    *operation = op;
                }
            }
            error
        })
    }

    fn at_coordinate(self, coordinate: [i32; 2]) -> Result<T> {
        self.with_context(ErrorContext {
            coordinate: Some(coordinate),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for ModelError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ModelError {
    ModelError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a host failure error without positional context
pub fn host_failure(operation: &'static str, reason: &impl ToString) -> ModelError {
    ModelError::HostFailure {
        operation,
        coordinate: None,
        reason: reason.to_string(),
    }
}

/// Create a path error for paths that cannot be represented
pub fn path_error(path: &std::path::Path, msg: &str) -> ModelError {
    ModelError::InvalidParameter {
        parameter: "path",
        value: path.display().to_string(),
        reason: msg.to_string(),
    }
}
