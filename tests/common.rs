//! Test utilities for bhumi-grid integration tests.
//!
//! Helpers for building grids with a known pattern of categories.

#![allow(dead_code)]

use bhumi_grid::{Occupancy, OccupancyGrid, SpatialTransform};

/// Initialize logging once per test binary.
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Transform used throughout the tests: origin (10m, 5m), 5cm cells.
pub fn test_transform() -> SpatialTransform {
    SpatialTransform::new(10.0, 5.0, 0.05).unwrap()
}

/// A room: floor everywhere, covered walls on the border, a few obstacles
/// that were also seen as floor, and one cell with a reserved bit.
pub fn room_grid(width: usize, height: usize) -> OccupancyGrid {
    let mut grid = OccupancyGrid::empty(width, height, test_transform()).unwrap();
    let (w, h) = (width as i32, height as i32);

    for y in 0..h {
        for x in 0..w {
            grid.mark(x, y, Occupancy::FLOOR).unwrap();
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                grid.mark(x, y, Occupancy::COVERED).unwrap();
            }
        }
    }

    for i in 2..(w.min(h) - 2) {
        grid.mark(i, i, Occupancy::OBSTACLE).unwrap();
    }

    grid.set_pixel(w / 2, 1, 0x41).unwrap();
    grid
}

/// Grid whose cells cycle through every byte value.
pub fn every_value_grid(width: usize, height: usize) -> OccupancyGrid {
    let mut grid = OccupancyGrid::empty(width, height, test_transform()).unwrap();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let value = (y * width as i32 + x) % 256;
            grid.set_pixel(x, y, value).unwrap();
        }
    }
    grid
}
