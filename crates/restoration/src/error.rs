use std::{collections::TryReserveError, io};

use thiserror::Error;

/// An error when restoring a raster
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RestoreError {
    /// A line of the input exceeded the configured maximum
    #[error("Line {line} is longer than {limit} bytes")]
    LineTooLong {
        /// The (1-based) number of the offending line
        line: usize,
        /// The configured maximum, including the terminator
        limit: usize,
    },
    /// A buffer could not grow
    #[error("Allocation failed")]
    AllocationFailure(#[from] TryReserveError),
    /// A decoded row does not have the width of the raster
    #[error("Row {row} has {actual} pixels, expected {expected}")]
    RasterWidthMismatch {
        /// The (0-based) index of the offending row
        row: usize,
        /// The width of the raster
        expected: usize,
        /// The length of the row
        actual: usize,
    },
    /// The raster does not fit the dimensions of an image
    #[error("Raster of {width}x{height} pixels is too large")]
    RasterTooLarge {
        /// The width of the raster
        width: usize,
        /// The number of rows
        height: usize,
    },
    /// Reading the input or writing the output failed
    #[error("Failed IO")]
    Io(#[from] io::Error),
}

/// Type alias for convenience
pub type RestoreResult<T> = Result<T, RestoreError>;
