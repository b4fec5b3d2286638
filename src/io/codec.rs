//! Codec seams for the two persisted artifacts.
//!
//! The load/save protocol only talks to these traits, so the raster and
//! metadata formats can be swapped (PNG or PGM, JSON or anything else that
//! carries the five metadata fields).

use crate::error::PersistError;
use crate::grid::GridBuffer;

use super::metadata::GridMetadata;

/// Lossless 8-bit single-channel raster format.
pub trait RasterCodec {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Decode raster bytes into a grid buffer.
    ///
    /// Must fail with [`PersistError::RasterDecode`] on corrupt data or any
    /// pixel layout other than 8-bit single channel.
    fn decode(&self, bytes: &[u8]) -> Result<GridBuffer, PersistError>;

    /// Encode a grid buffer without altering any cell value.
    fn encode(&self, buffer: &GridBuffer) -> Result<Vec<u8>, PersistError>;
}

/// Structured key-value metadata format.
pub trait MetadataCodec {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Parse metadata text.
    ///
    /// Must fail with [`PersistError::MetadataParse`] on malformed input or
    /// missing required fields.
    fn parse(&self, text: &str) -> Result<GridMetadata, PersistError>;

    /// Serialize metadata to text.
    fn serialize(&self, metadata: &GridMetadata) -> Result<String, PersistError>;
}
