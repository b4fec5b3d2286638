//! Load/save protocol for the raster + metadata pair.
//!
//! Load is all-or-nothing: the raster is decoded, the metadata parsed, the
//! two cross-checked, and only then is a grid built. Save encodes both
//! artifacts in memory before touching the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::OccupancyGrid;
use crate::error::PersistError;

use super::codec::{MetadataCodec, RasterCodec};
use super::metadata::{GridMetadata, JsonMetadata};
use super::raster::PngRaster;

/// Default raster file name
pub const DEFAULT_RASTER_FILE: &str = "occupancy_grid.png";

/// Default metadata file name
pub const DEFAULT_METADATA_FILE: &str = "occupancy_grid_metadata.json";

/// Paths of the two companion files for one grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridFiles {
    /// Bitmask raster
    pub raster: PathBuf,
    /// Metadata record
    pub metadata: PathBuf,
}

impl GridFiles {
    /// Explicit raster and metadata paths.
    pub fn new(raster: impl Into<PathBuf>, metadata: impl Into<PathBuf>) -> Self {
        Self {
            raster: raster.into(),
            metadata: metadata.into(),
        }
    }

    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_RASTER_FILE), dir.join(DEFAULT_METADATA_FILE))
    }

    /// Both files exist.
    pub fn exist(&self) -> bool {
        self.raster.is_file() && self.metadata.is_file()
    }
}

// === Load ===

/// Load a grid from a PNG raster and JSON metadata.
pub fn load_grid<P, Q>(raster_path: P, metadata_path: Q) -> Result<OccupancyGrid, PersistError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    load_grid_with(raster_path, metadata_path, &PngRaster, &JsonMetadata)
}

/// Load a grid using the given codecs.
pub fn load_grid_with<P, Q, R, M>(
    raster_path: P,
    metadata_path: Q,
    raster_codec: &R,
    metadata_codec: &M,
) -> Result<OccupancyGrid, PersistError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: RasterCodec + ?Sized,
    M: MetadataCodec + ?Sized,
{
    let raster_path = raster_path.as_ref();
    let metadata_path = metadata_path.as_ref();

    let raster_bytes = read_file(raster_path)?;
    let buffer = raster_codec.decode(&raster_bytes)?;

    let metadata_bytes = read_file(metadata_path)?;
    let metadata_text = std::str::from_utf8(&metadata_bytes)
        .map_err(|e| PersistError::MetadataParse(format!("not UTF-8: {}", e)))?;
    let metadata = metadata_codec.parse(metadata_text)?;

    let grid = assemble(buffer, &metadata)?;

    log::info!(
        "Loaded {}x{} grid @ {}m/px from {} ({}) + {} ({})",
        grid.width(),
        grid.height(),
        grid.meters_per_pixel(),
        raster_path.display(),
        raster_codec.name(),
        metadata_path.display(),
        metadata_codec.name()
    );
    Ok(grid)
}

/// Decode a grid from in-memory artifacts.
pub fn decode_grid<R, M>(
    raster_bytes: &[u8],
    metadata_text: &str,
    raster_codec: &R,
    metadata_codec: &M,
) -> Result<OccupancyGrid, PersistError>
where
    R: RasterCodec + ?Sized,
    M: MetadataCodec + ?Sized,
{
    let buffer = raster_codec.decode(raster_bytes)?;
    let metadata = metadata_codec.parse(metadata_text)?;
    assemble(buffer, &metadata)
}

/// Cross-validate dimensions, then build the grid.
fn assemble(
    buffer: crate::grid::GridBuffer,
    metadata: &GridMetadata,
) -> Result<OccupancyGrid, PersistError> {
    let raster = (buffer.width() as u32, buffer.height() as u32);
    let claimed = metadata.dimensions();
    let fits_u32 = u32::try_from(buffer.width()).is_ok() && u32::try_from(buffer.height()).is_ok();
    if !fits_u32 || raster != claimed {
        log::warn!(
            "Raster is {}x{} but metadata claims {}x{}",
            buffer.width(),
            buffer.height(),
            claimed.0,
            claimed.1
        );
        return Err(PersistError::MetadataMismatch {
            raster,
            metadata: claimed,
        });
    }

    let transform = metadata.to_transform()?;
    Ok(OccupancyGrid::from_parts(buffer, transform))
}

fn read_file(path: &Path) -> Result<Vec<u8>, PersistError> {
    fs::read(path).map_err(|e| PersistError::from_io(path, e))
}

// === Save ===

/// Save a grid as a PNG raster and JSON metadata.
pub fn save_grid<P, Q>(grid: &OccupancyGrid, raster_path: P, metadata_path: Q) -> Result<(), PersistError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    save_grid_with(grid, raster_path, metadata_path, &PngRaster, &JsonMetadata)
}

/// Save a grid using the given codecs.
pub fn save_grid_with<P, Q, R, M>(
    grid: &OccupancyGrid,
    raster_path: P,
    metadata_path: Q,
    raster_codec: &R,
    metadata_codec: &M,
) -> Result<(), PersistError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: RasterCodec + ?Sized,
    M: MetadataCodec + ?Sized,
{
    let raster_path = raster_path.as_ref();
    let metadata_path = metadata_path.as_ref();

    let (raster_bytes, metadata_text) = encode_grid(grid, raster_codec, metadata_codec)?;

    write_file(raster_path, &raster_bytes)?;
    write_file(metadata_path, metadata_text.as_bytes())?;

    log::info!(
        "Saved {}x{} grid to {} + {}",
        grid.width(),
        grid.height(),
        raster_path.display(),
        metadata_path.display()
    );
    Ok(())
}

/// Encode a grid into (raster bytes, metadata text).
pub fn encode_grid<R, M>(
    grid: &OccupancyGrid,
    raster_codec: &R,
    metadata_codec: &M,
) -> Result<(Vec<u8>, String), PersistError>
where
    R: RasterCodec + ?Sized,
    M: MetadataCodec + ?Sized,
{
    let raster_bytes = raster_codec.encode(grid.buffer())?;
    let metadata_text = metadata_codec.serialize(&GridMetadata::from_grid(grid)?)?;
    log::debug!(
        "Encoded raster ({} bytes, {}) and metadata ({} bytes, {})",
        raster_bytes.len(),
        raster_codec.name(),
        metadata_text.len(),
        metadata_codec.name()
    );
    Ok((raster_bytes, metadata_text))
}

pub(super) fn write_file(path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| PersistError::from_io(parent, e))?;
        }
    }
    fs::write(path, contents).map_err(|e| PersistError::from_io(path, e))
}
