//! # bhumi-grid
//!
//! Bitmask occupancy grid with a metric transform and PNG/JSON persistence.
//!
//! ## Overview
//!
//! Each cell is one byte whose low bits record which kinds of obstruction
//! were observed there:
//!
//! - **Unknown** (0) - No map data
//! - **Floor** (bit 0) - Floor detected
//! - **Covered** (bit 1) - Obstruction no lower than 0.5m
//! - **Obstacle** (bit 2) - Obstruction between 0.05m and 0.5m
//!
//! Bits combine freely, so a cell can be Floor and Obstacle at once. The
//! remaining bits are reserved and preserved verbatim.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bhumi_grid::{OccupancyGrid, Occupancy, SpatialTransform};
//!
//! // 50 x 50 cells, cell (0, 0) centered at (10m, 5m), 5cm cells
//! let transform = SpatialTransform::new(10.0, 5.0, 0.05)?;
//! let mut grid = OccupancyGrid::empty(50, 50, transform)?;
//!
//! grid.set_pixel(3, 4, Occupancy::FLOOR.bits() as i32)?;
//! grid.mark(3, 4, Occupancy::OBSTACLE)?;
//!
//! grid.save("occupancy_grid.png", "occupancy_grid_metadata.json")?;
//! let loaded = OccupancyGrid::load("occupancy_grid.png", "occupancy_grid_metadata.json")?;
//!
//! // Binary 0/255 mask for a cost map
//! let obstacles = loaded.extract_obstacle();
//! ```
//!
//! ## Coordinate System
//!
//! - Cell (x, y) is column x, row y; storage is row-major
//! - The origin is the world position of the center of cell (0, 0)
//! - `pixel = (metric - origin) / meters_per_pixel`, same scale on both axes
//!
//! ## Ownership
//!
//! A grid is a plain owned value. Shared `&OccupancyGrid` readers (queries,
//! extraction) may run concurrently; mutation needs `&mut`. Callers that need
//! concurrent reads and writes wrap the grid in their own lock.

#![warn(missing_docs)]

// Core types
pub mod core;

// Error types
pub mod error;

// Grid storage, transform and extraction
pub mod grid;

// Persistence (save/load/export)
pub mod io;

// Configuration
pub mod config;

use std::path::Path;

// Re-export commonly used types
pub use crate::core::{CategoryCounts, CellValue, GridCoord, Occupancy, WorldPoint};
pub use crate::core::{ABSENT, PRESENT, compose, has_category, with_category};

pub use error::{GridError, PersistError};

pub use grid::{GridBuffer, SpatialTransform};

pub use io::{GridFiles, GridMetadata, JsonMetadata, MetadataCodec, PngRaster, RasterCodec};

pub use config::{BhumiConfig, ConfigLoadError};

/// The occupancy grid: cell storage plus spatial transform.
///
/// This is the primary type for interacting with the map.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    /// Cell storage
    buffer: GridBuffer,
    /// Metric <-> pixel mapping
    transform: SpatialTransform,
}

impl OccupancyGrid {
    /// Create a grid with every cell Unknown.
    pub fn empty(width: usize, height: usize, transform: SpatialTransform) -> error::Result<Self> {
        Ok(Self {
            buffer: GridBuffer::new(width, height)?,
            transform,
        })
    }

    /// Combine existing storage and transform.
    pub fn from_parts(buffer: GridBuffer, transform: SpatialTransform) -> Self {
        Self { buffer, transform }
    }

    /// Split into storage and transform.
    pub fn into_parts(self) -> (GridBuffer, SpatialTransform) {
        (self.buffer, self.transform)
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    /// Load a grid from a PNG raster and JSON metadata file.
    ///
    /// Fails without producing a grid if either file is missing, unreadable,
    /// malformed, or the two disagree on dimensions.
    pub fn load<P, Q>(raster_path: P, metadata_path: Q) -> Result<Self, PersistError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        io::load_grid(raster_path, metadata_path)
    }

    /// Load from the default file names inside `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, PersistError> {
        let files = GridFiles::in_dir(dir);
        io::load_grid(&files.raster, &files.metadata)
    }

    /// Replace this grid with one loaded from disk.
    ///
    /// On failure `self` is left exactly as it was.
    pub fn reload<P, Q>(&mut self, raster_path: P, metadata_path: Q) -> Result<(), PersistError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        *self = io::load_grid(raster_path, metadata_path)?;
        Ok(())
    }

    /// Save as a PNG raster and JSON metadata file.
    pub fn save<P, Q>(&self, raster_path: P, metadata_path: Q) -> Result<(), PersistError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        io::save_grid(self, raster_path, metadata_path)
    }

    /// Save using the default file names inside `dir`.
    pub fn save_dir(&self, dir: impl AsRef<Path>) -> Result<GridFiles, PersistError> {
        let files = GridFiles::in_dir(dir);
        io::save_grid(self, &files.raster, &files.metadata)?;
        Ok(files)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// World x of the center of cell (0, 0), meters.
    #[inline]
    pub fn origin_x(&self) -> f32 {
        self.transform.origin_x()
    }

    /// World y of the center of cell (0, 0), meters.
    #[inline]
    pub fn origin_y(&self) -> f32 {
        self.transform.origin_y()
    }

    /// Meters covered by each cell.
    #[inline]
    pub fn meters_per_pixel(&self) -> f32 {
        self.transform.meters_per_pixel()
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// Spatial transform.
    #[inline]
    pub fn transform(&self) -> &SpatialTransform {
        &self.transform
    }

    /// Cell storage.
    #[inline]
    pub fn buffer(&self) -> &GridBuffer {
        &self.buffer
    }

    /// World bounds: (min_point, max_point) of the outer cell edges.
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        self.transform.bounds(self.width(), self.height())
    }

    // =========================================================================
    // CELL ACCESS
    // =========================================================================

    /// Cell value at column `x`, row `y`.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> error::Result<CellValue> {
        self.buffer.get(GridCoord::new(x, y))
    }

    /// Set the cell at column `x`, row `y` to `value` (0-255).
    ///
    /// The value is range-checked before the coordinate; nothing is written
    /// on either failure.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: i32) -> error::Result<()> {
        let value = CellValue::try_from(value).map_err(|_| GridError::OutOfRange {
            value: i64::from(value),
        })?;
        self.buffer.set(GridCoord::new(x, y), value)
    }

    /// Add `category` to the cell, keeping bits already set. Returns the new value.
    pub fn mark(&mut self, x: i32, y: i32, category: Occupancy) -> error::Result<CellValue> {
        self.buffer.mark(GridCoord::new(x, y), category)
    }

    /// Whether the cell has every bit of `category`.
    pub fn has_category_at(&self, x: i32, y: i32, category: Occupancy) -> error::Result<bool> {
        self.get_pixel(x, y).map(|v| has_category(v, category))
    }

    /// Nearest cell to a world point.
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        self.transform.world_to_grid(point)
    }

    /// World position of a cell center.
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        self.transform.grid_to_world(coord)
    }

    /// Cell value at the cell nearest a world point.
    pub fn get_world(&self, point: WorldPoint) -> error::Result<CellValue> {
        self.buffer.get(self.world_to_grid(point))
    }

    /// Is the world point inside the grid?
    pub fn contains_point(&self, point: WorldPoint) -> bool {
        self.buffer.is_valid_coord(self.world_to_grid(point))
    }

    /// Per-category cell counts.
    pub fn count_by_category(&self) -> CategoryCounts {
        self.buffer.count_by_category()
    }

    /// Reset every cell to Unknown.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    // =========================================================================
    // CATEGORY EXTRACTION
    // =========================================================================

    /// New grid: 255 where Floor is set, 0 elsewhere.
    pub fn extract_floor(&self) -> OccupancyGrid {
        grid::extract_floor(self)
    }

    /// New grid: 255 where Covered is set, 0 elsewhere.
    pub fn extract_covered(&self) -> OccupancyGrid {
        grid::extract_covered(self)
    }

    /// New grid: 255 where Obstacle is set, 0 elsewhere.
    pub fn extract_obstacle(&self) -> OccupancyGrid {
        grid::extract_obstacle(self)
    }

    /// New grid: 255 where every bit of `category` is set, 0 elsewhere.
    pub fn extract_category(&self, category: Occupancy) -> OccupancyGrid {
        grid::extract_category(self, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn transform() -> SpatialTransform {
        SpatialTransform::new(10.0, 5.0, 0.05).unwrap()
    }

    #[test]
    fn test_empty_grid_is_unknown() {
        let grid = OccupancyGrid::empty(50, 50, transform()).unwrap();
        for y in 0..50 {
            for x in 0..50 {
                assert_eq!(grid.get_pixel(x, y), Ok(0));
            }
        }
        assert_eq!(grid.count_by_category().unknown, 2500);
    }

    #[test]
    fn test_accessors() {
        let grid = OccupancyGrid::empty(100, 80, transform()).unwrap();
        assert_eq!(grid.origin_x(), 10.0);
        assert_eq!(grid.origin_y(), 5.0);
        assert_eq!(grid.meters_per_pixel(), 0.05);
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 80);
    }

    #[test]
    fn test_set_pixel_range_checked() {
        let mut grid = OccupancyGrid::empty(4, 4, transform()).unwrap();
        assert_eq!(grid.set_pixel(1, 1, 255), Ok(()));
        assert_eq!(grid.set_pixel(1, 1, 0), Ok(()));
        assert_eq!(
            grid.set_pixel(1, 1, 256),
            Err(GridError::OutOfRange { value: 256 })
        );
        assert_eq!(
            grid.set_pixel(1, 1, -1),
            Err(GridError::OutOfRange { value: -1 })
        );
        assert_eq!(grid.get_pixel(1, 1), Ok(0));
    }

    #[test]
    fn test_set_pixel_bounds_checked() {
        let mut grid = OccupancyGrid::empty(4, 3, transform()).unwrap();
        let err = grid.set_pixel(4, 0, 1).unwrap_err();
        assert_eq!(
            err,
            GridError::IndexOutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            }
        );
        assert!(grid.get_pixel(0, -1).is_err());
        assert!(grid.get_pixel(0, 3).is_err());
    }

    #[test]
    fn test_mark_keeps_other_categories() {
        let mut grid = OccupancyGrid::empty(2, 2, transform()).unwrap();
        grid.mark(0, 0, Occupancy::OBSTACLE).unwrap();
        grid.mark(0, 0, Occupancy::FLOOR).unwrap();
        assert_eq!(grid.has_category_at(0, 0, Occupancy::OBSTACLE), Ok(true));
        assert_eq!(grid.has_category_at(0, 0, Occupancy::FLOOR), Ok(true));
        assert_eq!(grid.has_category_at(0, 0, Occupancy::COVERED), Ok(false));
    }

    #[test]
    fn test_world_queries() {
        let mut grid = OccupancyGrid::empty(40, 40, transform()).unwrap();
        grid.set_pixel(20, 0, 4).unwrap();

        assert_eq!(grid.world_to_grid(WorldPoint::new(10.0, 5.0)), GridCoord::new(0, 0));
        assert_eq!(grid.get_world(WorldPoint::new(11.0, 5.0)), Ok(4));
        assert_relative_eq!(grid.grid_to_world(GridCoord::new(20, 0)).x, 11.0, epsilon = 1e-5);

        assert!(grid.contains_point(WorldPoint::new(10.5, 5.5)));
        assert!(!grid.contains_point(WorldPoint::new(9.0, 5.0)));
        assert!(grid.get_world(WorldPoint::new(9.0, 5.0)).is_err());
    }

    #[test]
    fn test_clear() {
        let mut grid = OccupancyGrid::empty(3, 3, transform()).unwrap();
        grid.set_pixel(2, 2, 7).unwrap();
        grid.clear();
        assert_eq!(grid.get_pixel(2, 2), Ok(0));
    }

    #[test]
    fn test_parts_round_trip() {
        let mut grid = OccupancyGrid::empty(5, 2, transform()).unwrap();
        grid.set_pixel(4, 1, 0x87).unwrap();

        let (buffer, t) = grid.clone().into_parts();
        assert_eq!(buffer.as_slice()[9], 0x87);
        assert_eq!(OccupancyGrid::from_parts(buffer, t), grid);
    }

    #[test]
    fn test_grid_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OccupancyGrid>();
    }
}
