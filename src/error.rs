//! Error types for bhumi-grid.
//!
//! Two families:
//! - [`GridError`]: in-memory failures (bad coordinates, bad values, bad transform)
//! - [`PersistError`]: load/save failures, split so callers can tell a missing
//!   file apart from a file that exists but is structurally invalid

use std::path::PathBuf;

/// Result alias for in-memory grid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors raised by grid queries, mutations and construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Coordinate outside `[0, width) x [0, height)`
    #[error("Index ({x}, {y}) out of bounds for {width}x{height} grid")]
    IndexOutOfBounds {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
    },

    /// Cell value outside `[0, 255]`
    #[error("Cell value {value} out of range 0-255")]
    OutOfRange {
        /// Rejected value
        value: i64,
    },

    /// Scale is not a finite positive number, or the origin is not finite
    #[error(
        "Invalid spatial transform (origin = ({origin_x}, {origin_y}), meters_per_pixel = {meters_per_pixel})"
    )]
    InvalidTransform {
        /// Requested origin x
        origin_x: f32,
        /// Requested origin y
        origin_y: f32,
        /// Requested scale
        meters_per_pixel: f32,
    },

    /// Zero dimension, or `width * height` overflows
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// Raw buffer length not equal to `width * height`
    #[error("Buffer of {len} cells does not fit a {width}x{height} grid")]
    BufferLength {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Supplied buffer length
        len: usize,
    },
}

/// Errors raised while loading or saving a grid.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// File does not exist
    #[error("File not found: {}", .path.display())]
    NotFound {
        /// Missing path
        path: PathBuf,
    },

    /// Any other I/O failure on a path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Raster is corrupt or not 8-bit single channel
    #[error("Raster decode error: {0}")]
    RasterDecode(String),

    /// Raster could not be encoded
    #[error("Raster encode error: {0}")]
    RasterEncode(String),

    /// Metadata is malformed or missing required fields
    #[error("Metadata parse error: {0}")]
    MetadataParse(String),

    /// Metadata could not be serialized
    #[error("Metadata serialize error: {0}")]
    MetadataSerialize(String),

    /// Raster and metadata disagree on dimensions
    #[error(
        "Metadata mismatch: raster is {}x{}, metadata claims {}x{}",
        .raster.0, .raster.1, .metadata.0, .metadata.1
    )]
    MetadataMismatch {
        /// (width, height) of the decoded raster
        raster: (u32, u32),
        /// (width, height) recorded in the metadata
        metadata: (u32, u32),
    },

    /// Decoded values do not form a valid grid
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl PersistError {
    /// Wrap an I/O error, mapping `NotFound` to its own variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PersistError::NotFound { path }
        } else {
            PersistError::Io { path, source }
        }
    }

    /// The file was absent (suggests scanning a new area).
    pub fn is_missing(&self) -> bool {
        matches!(self, PersistError::NotFound { .. })
    }

    /// The files exist but their contents are invalid (suggests corruption).
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            PersistError::RasterDecode(_)
                | PersistError::MetadataParse(_)
                | PersistError::MetadataMismatch { .. }
                | PersistError::Grid(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_missing() {
        let err = PersistError::from_io(
            "nowhere.png",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.is_missing());
        assert!(!err.is_corrupt());
    }

    #[test]
    fn test_other_io_is_neither() {
        let err = PersistError::from_io(
            "locked.png",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, PersistError::Io { .. }));
        assert!(!err.is_missing());
        assert!(!err.is_corrupt());
    }

    #[test]
    fn test_mismatch_is_corrupt() {
        let err = PersistError::MetadataMismatch {
            raster: (100, 80),
            metadata: (100, 81),
        };
        assert!(err.is_corrupt());
        assert_eq!(
            err.to_string(),
            "Metadata mismatch: raster is 100x80, metadata claims 100x81"
        );
    }
}
