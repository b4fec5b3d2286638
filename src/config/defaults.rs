//! Default value functions for serde deserialization.

use crate::io::{DEFAULT_METADATA_FILE, DEFAULT_RASTER_FILE};

// 20m at 5cm
pub fn grid_size() -> usize {
    400
}

pub fn meters_per_pixel() -> f32 {
    0.05
}

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn raster_file() -> String {
    DEFAULT_RASTER_FILE.to_string()
}

pub fn metadata_file() -> String {
    DEFAULT_METADATA_FILE.to_string()
}
