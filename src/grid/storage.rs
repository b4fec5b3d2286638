//! Dense cell storage.
//!
//! One byte per cell, row-major:
//!
//! ```text
//! index = y * width + x
//!
//!   data: [ (0,0) (1,0) ... (w-1,0) | (0,1) (1,1) ... | ... (w-1,h-1) ]
//! ```

use crate::core::{CategoryCounts, CellValue, GridCoord, Occupancy};
use crate::error::{GridError, Result};

/// Dense 2D array of cell values.
///
/// Invariant: `data.len() == width * height`, both dimensions non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBuffer {
    data: Vec<CellValue>,
    width: usize,
    height: usize,
}

impl GridBuffer {
    /// Create a grid with every cell `Unknown` (0).
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Occupancy::UNKNOWN.bits())
    }

    /// Create a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: CellValue) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            data: vec![value; len],
            width,
            height,
        })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_raw(width: usize, height: usize, data: Vec<CellValue>) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        if data.len() != len {
            return Err(GridError::BufferLength {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    fn checked_len(width: usize, height: usize) -> Result<usize> {
        match width.checked_mul(height) {
            Some(len) if len > 0 => Ok(len),
            _ => Err(GridError::InvalidDimensions { width, height }),
        }
    }

    // === Basic Properties ===

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    /// Row-major cell values.
    #[inline]
    pub fn as_slice(&self) -> &[CellValue] {
        &self.data
    }

    /// Consume the buffer, returning the row-major cell values.
    pub fn into_raw(self) -> Vec<CellValue> {
        self.data
    }

    // === Indexing ===

    /// Check if grid coordinates are within bounds.
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Convert grid coordinates to flat array index.
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert flat array index to grid coordinates.
    #[inline]
    pub fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    fn checked_index(&self, coord: GridCoord) -> Result<usize> {
        self.coord_to_index(coord)
            .ok_or(GridError::IndexOutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })
    }

    // === Cell Access ===

    /// Get the cell value at `coord`.
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Result<CellValue> {
        self.checked_index(coord).map(|i| self.data[i])
    }

    /// Set the cell value at `coord`.
    #[inline]
    pub fn set(&mut self, coord: GridCoord, value: CellValue) -> Result<()> {
        let i = self.checked_index(coord)?;
        self.data[i] = value;
        Ok(())
    }

    /// OR `category` into the cell at `coord`, returning the new value.
    pub fn mark(&mut self, coord: GridCoord, category: Occupancy) -> Result<CellValue> {
        let i = self.checked_index(coord)?;
        self.data[i] |= category.bits();
        Ok(self.data[i])
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: CellValue) {
        self.data.fill(value);
    }

    /// Reset every cell to `Unknown`.
    pub fn clear(&mut self) {
        self.fill(Occupancy::UNKNOWN.bits());
    }

    /// Iterate over `(coord, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellValue)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.index_to_coord(i), v))
    }

    /// Build a same-size buffer by mapping every cell value.
    pub fn map<F>(&self, f: F) -> GridBuffer
    where
        F: Fn(CellValue) -> CellValue,
    {
        GridBuffer {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Count cells per category.
    pub fn count_by_category(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for &value in &self.data {
            counts.add(value);
        }
        counts
    }
}
