//! Core types for the bhumi-grid library.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`GridCoord`]: Integer cell indices for grid access
//! - [`WorldPoint`]: Floating-point world coordinates in meters
//!
//! ### Grid Cells
//! - [`Occupancy`]: Category bit flags (Floor, Covered, Obstacle)
//! - [`CellValue`]: Raw byte stored per cell
//! - [`CategoryCounts`]: Per-category tallies over a grid

mod cell;
mod point;

pub use cell::{
    ABSENT, CategoryCounts, CellValue, Occupancy, PRESENT, compose, has_category, with_category,
    without_category,
};
pub use point::{GridCoord, WorldPoint};
