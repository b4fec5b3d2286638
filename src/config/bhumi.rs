//! Main BhumiConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::OccupancyGrid;
use crate::error::PersistError;
use crate::io::{self, GridFiles};

use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::persistence::PersistenceSection;

/// Full configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct BhumiConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Persistence settings
    #[serde(default)]
    pub persistence: PersistenceSection,
}

impl BhumiConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Raster and metadata paths from the persistence section
    pub fn files(&self) -> GridFiles {
        self.persistence.files()
    }

    /// Load the persisted grid if both files exist, otherwise start an empty one.
    ///
    /// A corrupt pair is an error; only absent files fall back to a fresh grid.
    pub fn open_or_create(&self) -> Result<OccupancyGrid, PersistError> {
        let files = self.files();
        match io::load_grid(&files.raster, &files.metadata) {
            Ok(grid) => Ok(grid),
            Err(e) if e.is_missing() => {
                log::info!("No saved grid ({}), starting empty", e);
                Ok(self.grid.to_empty_grid()?)
            }
            Err(e) => Err(e),
        }
    }

    /// Save the grid to the configured files (and the ROS pair if enabled).
    pub fn save(&self, grid: &OccupancyGrid) -> Result<(), PersistError> {
        let files = self.files();
        io::save_grid(grid, &files.raster, &files.metadata)?;
        if self.persistence.ros_export {
            io::export_ros_map(grid, &self.persistence.ros_base())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn test_default_config() {
        let config = BhumiConfig::default();
        assert_eq!(config.grid.meters_per_pixel, 0.05);
        assert_eq!(config.grid.width, 400);
        assert_eq!(config.persistence.raster_file, "occupancy_grid.png");
        assert!(!config.persistence.ros_export);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = BhumiConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: BhumiConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.grid.meters_per_pixel, config.grid.meters_per_pixel);
        assert_eq!(parsed.persistence.output_dir, config.persistence.output_dir);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = BhumiConfig::from_yaml("grid:\n  width: 50\n  origin_x: 10.0\n").unwrap();
        assert_eq!(config.grid.width, 50);
        assert_eq!(config.grid.height, 400);
        assert_eq!(config.grid.origin_x, 10.0);
        assert_eq!(config.persistence.metadata_file, "occupancy_grid_metadata.json");
    }

    #[test]
    fn test_invalid_grid_section() {
        let config = BhumiConfig::from_yaml("grid:\n  meters_per_pixel: 0.0\n").unwrap();
        assert!(matches!(
            config.grid.to_empty_grid(),
            Err(GridError::InvalidTransform { .. })
        ));
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(
            BhumiConfig::from_yaml("grid: [1, 2"),
            Err(ConfigLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_open_or_create_then_save() {
        let dir = tempfile::TempDir::new().unwrap();
        let yaml = format!(
            "grid:\n  width: 8\n  height: 6\npersistence:\n  output_dir: {:?}\n  ros_export: true\n",
            dir.path().display().to_string()
        );
        let config = BhumiConfig::from_yaml(&yaml).unwrap();

        let mut grid = config.open_or_create().unwrap();
        assert_eq!((grid.width(), grid.height()), (8, 6));
        grid.set_pixel(3, 2, 5).unwrap();
        config.save(&grid).unwrap();

        assert!(dir.path().join("map.pgm").is_file());
        let reopened = config.open_or_create().unwrap();
        assert_eq!(reopened, grid);
    }
}
