//! Category extraction.
//!
//! Turns a multi-bit occupancy grid into a binary mask for one category:
//! [`PRESENT`] where the source cell has the category bit, [`ABSENT`]
//! elsewhere. The result is a new grid with the same dimensions and
//! transform; the source is only borrowed.

use crate::OccupancyGrid;
use crate::core::{ABSENT, Occupancy, PRESENT, has_category};

/// Binary mask of `category` over `source`.
pub fn extract_category(source: &OccupancyGrid, category: Occupancy) -> OccupancyGrid {
    let buffer = source.buffer().map(|value| {
        if has_category(value, category) {
            PRESENT
        } else {
            ABSENT
        }
    });
    log::debug!(
        "Extracted {:?} mask from {}x{} grid",
        category,
        buffer.width(),
        buffer.height()
    );
    OccupancyGrid::from_parts(buffer, *source.transform())
}

/// Floor cells set to 255, everything else 0.
pub fn extract_floor(source: &OccupancyGrid) -> OccupancyGrid {
    extract_category(source, Occupancy::FLOOR)
}

/// Covered cells set to 255, everything else 0.
pub fn extract_covered(source: &OccupancyGrid) -> OccupancyGrid {
    extract_category(source, Occupancy::COVERED)
}

/// Obstacle cells set to 255, everything else 0.
pub fn extract_obstacle(source: &OccupancyGrid) -> OccupancyGrid {
    extract_category(source, Occupancy::OBSTACLE)
}
