//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::OccupancyGrid;
use crate::error::Result;
use crate::grid::SpatialTransform;

use super::defaults;

/// Grid settings section used when starting a fresh map
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Width in cells
    #[serde(default = "defaults::grid_size")]
    pub width: usize,

    /// Height in cells
    #[serde(default = "defaults::grid_size")]
    pub height: usize,

    /// Cell size in meters (e.g. 0.05 = 5cm cells)
    #[serde(default = "defaults::meters_per_pixel")]
    pub meters_per_pixel: f32,

    /// World x of the center of cell (0, 0)
    #[serde(default)]
    pub origin_x: f32,

    /// World y of the center of cell (0, 0)
    #[serde(default)]
    pub origin_y: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: defaults::grid_size(),
            height: defaults::grid_size(),
            meters_per_pixel: defaults::meters_per_pixel(),
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl GridSection {
    /// Validated spatial transform
    pub fn to_transform(&self) -> Result<SpatialTransform> {
        SpatialTransform::new(self.origin_x, self.origin_y, self.meters_per_pixel)
    }

    /// Empty (all Unknown) grid with these settings
    pub fn to_empty_grid(&self) -> Result<OccupancyGrid> {
        OccupancyGrid::empty(self.width, self.height, self.to_transform()?)
    }
}
