//! ROS map_server export.
//!
//! Writes the grid as a trinary occupancy map that Nav2's map_server can
//! load directly:
//! - `{base}.pgm` - Binary PGM, image bottom row = grid row 0
//! - `{base}.yaml` - resolution, origin of the bottom-left cell corner, thresholds
//!
//! Export only: the bitmask categories collapse to free/occupied/unknown and
//! cannot be recovered from these files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::OccupancyGrid;
use crate::core::{CellValue, Occupancy};
use crate::error::PersistError;
use crate::grid::GridBuffer;

use super::codec::RasterCodec;
use super::persistence::write_file;
use super::raster::PgmRaster;

/// PGM value for free floor
pub const ROS_FREE: u8 = 254;
/// PGM value for blocked cells
pub const ROS_OCCUPIED: u8 = 0;
/// PGM value for unobserved cells
pub const ROS_UNKNOWN: u8 = 205;

const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;
const DEFAULT_FREE_THRESH: f32 = 0.196;

/// map_server YAML record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosMapInfo {
    /// PGM file name, relative to the YAML file
    pub image: String,
    /// Meters per pixel
    pub resolution: f32,
    /// World [x, y, yaw] of the bottom-left pixel corner
    pub origin: [f32; 3],
    /// 0 = white is free
    pub negate: u8,
    /// Occupancy probability above which a pixel is occupied
    pub occupied_thresh: f32,
    /// Occupancy probability below which a pixel is free
    pub free_thresh: f32,
}

/// Files written by [`export_ros_map`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosExport {
    /// PGM image path
    pub pgm_path: PathBuf,
    /// YAML metadata path
    pub yaml_path: PathBuf,
}

/// Collapse a bitmask cell to a map_server pixel.
///
/// Any obstruction wins over floor; cells with only reserved bits are unknown.
pub fn ros_pixel(value: CellValue) -> u8 {
    let occ = Occupancy::from_value(value);
    if occ.is_blocked() {
        ROS_OCCUPIED
    } else if occ.is_floor() {
        ROS_FREE
    } else {
        ROS_UNKNOWN
    }
}

/// Build the map_server YAML record for a grid whose image is `image`.
pub fn ros_map_info(grid: &OccupancyGrid, image: String) -> RosMapInfo {
    let half = grid.meters_per_pixel() / 2.0;
    RosMapInfo {
        image,
        resolution: grid.meters_per_pixel(),
        origin: [grid.origin_x() - half, grid.origin_y() - half, 0.0],
        negate: 0,
        occupied_thresh: DEFAULT_OCCUPIED_THRESH,
        free_thresh: DEFAULT_FREE_THRESH,
    }
}

/// Export `grid` as `{base}.pgm` + `{base}.yaml`.
pub fn export_ros_map(grid: &OccupancyGrid, base: &Path) -> Result<RosExport, PersistError> {
    let pgm_path = base.with_extension("pgm");
    let yaml_path = base.with_extension("yaml");

    let width = grid.width();
    let height = grid.height();
    let cells = grid.buffer().as_slice();

    // Image rows run top-down, grid rows run up in world y
    let mut pixels = Vec::with_capacity(cells.len());
    for row in cells.chunks_exact(width).rev() {
        pixels.extend(row.iter().map(|&v| ros_pixel(v)));
    }
    let image = GridBuffer::from_raw(width, height, pixels)?;
    let pgm_bytes = PgmRaster.encode(&image)?;

    let image_name = pgm_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let info = ros_map_info(grid, image_name);
    let yaml = serde_yaml::to_string(&info)
        .map_err(|e| PersistError::MetadataSerialize(e.to_string()))?;
    let yaml = format!("# Occupancy grid exported by bhumi-grid\n\n{}", yaml);

    write_file(&pgm_path, &pgm_bytes)?;
    write_file(&yaml_path, yaml.as_bytes())?;

    log::info!(
        "Exported ROS map {} ({}x{})",
        pgm_path.display(),
        width,
        height
    );
    Ok(RosExport {
        pgm_path,
        yaml_path,
    })
}
