//! Sidecar metadata record (`occupancy_grid_metadata.json`).
//!
//! ```json
//! {
//!   "originX": 10.0,
//!   "originY": 5.0,
//!   "metersPerPixel": 0.05,
//!   "width": 100,
//!   "height": 80
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::OccupancyGrid;
use crate::error::PersistError;
use crate::grid::SpatialTransform;

use super::codec::MetadataCodec;

/// Transform and dimensions stored beside the raster.
///
/// All five fields are required when parsing; unknown extra fields are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridMetadata {
    /// World x of the center of cell (0, 0), meters
    pub origin_x: f32,
    /// World y of the center of cell (0, 0), meters
    pub origin_y: f32,
    /// Cell size, meters
    pub meters_per_pixel: f32,
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
}

impl GridMetadata {
    /// Describe an existing grid.
    pub fn from_grid(grid: &OccupancyGrid) -> Result<Self, PersistError> {
        let width = u32::try_from(grid.width()).map_err(|_| {
            PersistError::MetadataSerialize(format!("width {} too large", grid.width()))
        })?;
        let height = u32::try_from(grid.height()).map_err(|_| {
            PersistError::MetadataSerialize(format!("height {} too large", grid.height()))
        })?;
        Ok(Self {
            origin_x: grid.origin_x(),
            origin_y: grid.origin_y(),
            meters_per_pixel: grid.meters_per_pixel(),
            width,
            height,
        })
    }

    /// Validated transform; fails on a non-positive scale.
    pub fn to_transform(&self) -> Result<SpatialTransform, PersistError> {
        Ok(SpatialTransform::new(
            self.origin_x,
            self.origin_y,
            self.meters_per_pixel,
        )?)
    }

    /// Recorded (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// JSON metadata via serde_json.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonMetadata;

impl MetadataCodec for JsonMetadata {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, text: &str) -> Result<GridMetadata, PersistError> {
        serde_json::from_str(text).map_err(|e| PersistError::MetadataParse(e.to_string()))
    }

    fn serialize(&self, metadata: &GridMetadata) -> Result<String, PersistError> {
        serde_json::to_string_pretty(metadata)
            .map_err(|e| PersistError::MetadataSerialize(e.to_string()))
    }
}
