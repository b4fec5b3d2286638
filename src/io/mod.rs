//! Map persistence and export.
//!
//! A grid is persisted as two companion files:
//!
//! - **Raster** (`occupancy_grid.png`): 8-bit single-channel image, one pixel
//!   per cell, pixel value = cell bitmask
//! - **Metadata** (`occupancy_grid_metadata.json`): origin, scale, dimensions
//!
//! ## Saving and Loading Maps
//!
//! ```rust,ignore
//! use bhumi_grid::io::{GridFiles, load_grid, save_grid};
//!
//! let files = GridFiles::in_dir("maps/kitchen");
//! save_grid(&grid, &files.raster, &files.metadata)?;
//!
//! let loaded = load_grid(&files.raster, &files.metadata)?;
//! ```
//!
//! ## Custom Codecs
//!
//! Loading and saving go through [`RasterCodec`] and [`MetadataCodec`]. The
//! defaults are [`PngRaster`] and [`JsonMetadata`]; [`PgmRaster`] is also
//! available.
//!
//! ## ROS Export
//!
//! ```rust,ignore
//! use bhumi_grid::io::export_ros_map;
//!
//! // Creates map.pgm and map.yaml
//! export_ros_map(&grid, Path::new("map"))?;
//! ```

mod codec;
mod metadata;
mod persistence;
mod raster;
pub mod ros;

pub use codec::{MetadataCodec, RasterCodec};
pub use metadata::{GridMetadata, JsonMetadata};
pub use persistence::{
    DEFAULT_METADATA_FILE, DEFAULT_RASTER_FILE, GridFiles, decode_grid, encode_grid, load_grid,
    load_grid_with, save_grid, save_grid_with,
};
pub use raster::{PgmRaster, PngRaster};
pub use ros::{RosExport, RosMapInfo, export_ros_map};
