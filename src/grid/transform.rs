//! Metric <-> pixel transform.
//!
//! The origin is the world position of the *center* of cell (0, 0), and the
//! scale is uniform on both axes:
//!
//! ```text
//! pixel  = (metric - origin) / meters_per_pixel
//! metric = pixel * meters_per_pixel + origin
//! ```

use crate::core::{GridCoord, WorldPoint};
use crate::error::{GridError, Result};

/// Origin offset plus uniform scale.
///
/// Only constructible with a finite, positive `meters_per_pixel`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialTransform {
    origin_x: f32,
    origin_y: f32,
    meters_per_pixel: f32,
}

impl SpatialTransform {
    /// Create a transform, rejecting a non-positive or non-finite scale.
    pub fn new(origin_x: f32, origin_y: f32, meters_per_pixel: f32) -> Result<Self> {
        let valid_scale = meters_per_pixel.is_finite() && meters_per_pixel > 0.0;
        if !valid_scale || !origin_x.is_finite() || !origin_y.is_finite() {
            return Err(GridError::InvalidTransform {
                origin_x,
                origin_y,
                meters_per_pixel,
            });
        }
        Ok(Self {
            origin_x,
            origin_y,
            meters_per_pixel,
        })
    }

    /// Transform with cell (0, 0) centered at the world origin.
    pub fn at_origin(meters_per_pixel: f32) -> Result<Self> {
        Self::new(0.0, 0.0, meters_per_pixel)
    }

    /// Transform placing the world origin at the center of a `width x height` grid.
    pub fn centered(width: usize, height: usize, meters_per_pixel: f32) -> Result<Self> {
        let half_w = (width as f32 - 1.0) * meters_per_pixel / 2.0;
        let half_h = (height as f32 - 1.0) * meters_per_pixel / 2.0;
        Self::new(-half_w, -half_h, meters_per_pixel)
    }

    /// World x of the center of cell (0, 0).
    #[inline]
    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    /// World y of the center of cell (0, 0).
    #[inline]
    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    /// Meters covered by one cell along either axis.
    #[inline]
    pub fn meters_per_pixel(&self) -> f32 {
        self.meters_per_pixel
    }

    /// World coordinates of cell (0, 0) center.
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        WorldPoint::new(self.origin_x, self.origin_y)
    }

    // === Coordinate Conversion ===

    /// Fractional pixel position of a world point.
    #[inline]
    pub fn world_to_pixel(&self, point: WorldPoint) -> (f32, f32) {
        (
            (point.x - self.origin_x) / self.meters_per_pixel,
            (point.y - self.origin_y) / self.meters_per_pixel,
        )
    }

    /// Nearest cell to a world point. May lie outside any particular grid.
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        let (px, py) = self.world_to_pixel(point);
        GridCoord::new(px.round() as i32, py.round() as i32)
    }

    /// World position of a (possibly fractional) pixel position.
    #[inline]
    pub fn pixel_to_world(&self, px: f32, py: f32) -> WorldPoint {
        WorldPoint::new(
            px * self.meters_per_pixel + self.origin_x,
            py * self.meters_per_pixel + self.origin_y,
        )
    }

    /// World position of a cell center.
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        self.pixel_to_world(coord.x as f32, coord.y as f32)
    }

    /// World bounds of a `width x height` grid: (min_corner, max_corner) of the cell edges.
    pub fn bounds(&self, width: usize, height: usize) -> (WorldPoint, WorldPoint) {
        let half = self.meters_per_pixel / 2.0;
        let min = WorldPoint::new(self.origin_x - half, self.origin_y - half);
        let max = WorldPoint::new(
            min.x + width as f32 * self.meters_per_pixel,
            min.y + height as f32 * self.meters_per_pixel,
        );
        (min, max)
    }
}
