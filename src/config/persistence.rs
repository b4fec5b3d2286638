//! Persistence configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::io::GridFiles;

use super::defaults;

/// Persistence settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceSection {
    /// Output directory path
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Raster file name inside `output_dir`
    #[serde(default = "defaults::raster_file")]
    pub raster_file: String,

    /// Metadata file name inside `output_dir`
    #[serde(default = "defaults::metadata_file")]
    pub metadata_file: String,

    /// Also write a ROS map_server PGM+YAML pair on save
    #[serde(default)]
    pub ros_export: bool,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            raster_file: defaults::raster_file(),
            metadata_file: defaults::metadata_file(),
            ros_export: false,
        }
    }
}

impl PersistenceSection {
    /// Raster and metadata paths
    pub fn files(&self) -> GridFiles {
        let dir = PathBuf::from(&self.output_dir);
        GridFiles::new(dir.join(&self.raster_file), dir.join(&self.metadata_file))
    }

    /// Base path (no extension) for the ROS export
    pub fn ros_base(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join("map")
    }
}
