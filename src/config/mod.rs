//! Configuration loading for bhumi-grid.
//!
//! Loads settings from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bhumi_grid::config::BhumiConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = BhumiConfig::load_default()?;
//!
//! // Saved grid if present, fresh one otherwise
//! let mut grid = config.open_or_create()?;
//! grid.set_pixel(10, 4, 1)?;
//! config.save(&grid)?;
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   width: 400              # 20m
//!   height: 400
//!   meters_per_pixel: 0.05  # 5cm cells
//!   origin_x: -10.0
//!   origin_y: -10.0
//!
//! persistence:
//!   output_dir: ./output
//!   raster_file: occupancy_grid.png
//!   metadata_file: occupancy_grid_metadata.json
//!   ros_export: true
//! ```

mod bhumi;
mod defaults;
mod error;
mod grid;
mod persistence;

pub use bhumi::BhumiConfig;
pub use error::ConfigLoadError;
pub use grid::GridSection;
pub use persistence::PersistenceSection;
