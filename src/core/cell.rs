//! Bitmask cell model.
//!
//! Each cell is a single byte. The low three bits record which categories of
//! obstruction were observed at that location; they are independent and may
//! combine (a cell can be both Floor and Obstacle if both were seen at
//! different times or heights). Bits 3-7 are reserved for extension and are
//! carried through untouched.
//!
//! ```text
//!   bit:   7 6 5 4 3 | 2        1       0
//!          reserved  | OBSTACLE COVERED FLOOR
//! ```

use serde::{Deserialize, Serialize};

/// Raw per-cell value as stored in the grid and the raster.
pub type CellValue = u8;

/// Value written by extraction transforms where the category is present.
pub const PRESENT: CellValue = 255;

/// Value written by extraction transforms where the category is absent.
pub const ABSENT: CellValue = 0;

bitflags::bitflags! {
    /// Occupancy categories, one bit each.
    ///
    /// The empty set is [`Occupancy::UNKNOWN`]: nothing was observed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Occupancy: u8 {
        /// Floor was detected here
        const FLOOR = 1;
        /// Obstruction no lower than 0.5m
        const COVERED = 1 << 1;
        /// Obstruction between 0.05m and 0.5m
        const OBSTACLE = 1 << 2;
    }
}

impl Occupancy {
    /// No map data at this location.
    pub const UNKNOWN: Occupancy = Occupancy::empty();

    /// Interpret a raw cell value, keeping any reserved bits.
    #[inline]
    pub fn from_value(value: CellValue) -> Self {
        Occupancy::from_bits_retain(value)
    }

    /// Raw cell value (same as `bits()`).
    #[inline]
    pub fn value(self) -> CellValue {
        self.bits()
    }

    /// No category bit and no reserved bit is set.
    #[inline]
    pub fn is_unknown(self) -> bool {
        self.bits() == 0
    }

    /// Floor bit is set.
    #[inline]
    pub fn is_floor(self) -> bool {
        self.contains(Occupancy::FLOOR)
    }

    /// Covered bit is set.
    #[inline]
    pub fn is_covered(self) -> bool {
        self.contains(Occupancy::COVERED)
    }

    /// Obstacle bit is set.
    #[inline]
    pub fn is_obstacle(self) -> bool {
        self.contains(Occupancy::OBSTACLE)
    }

    /// Any obstruction (covered or obstacle) is present.
    #[inline]
    pub fn is_blocked(self) -> bool {
        self.intersects(Occupancy::COVERED | Occupancy::OBSTACLE)
    }

    /// Reserved bits 3-7 carried by this value.
    #[inline]
    pub fn extension_bits(self) -> u8 {
        self.bits() & !Occupancy::all().bits()
    }

    /// Single character representation for debugging dumps
    pub fn as_char(self) -> char {
        if self.is_covered() {
            '#'
        } else if self.is_obstacle() {
            'o'
        } else if self.is_floor() {
            '.'
        } else if self.extension_bits() != 0 {
            '*'
        } else {
            '?'
        }
    }
}

/// True iff every bit of `category` is set in `value`, regardless of other bits.
#[inline]
pub fn has_category(value: CellValue, category: Occupancy) -> bool {
    Occupancy::from_value(value).contains(category)
}

/// OR `category` into `value`. Never clears bits already set.
#[inline]
pub fn with_category(value: CellValue, category: Occupancy) -> CellValue {
    value | category.bits()
}

/// Clear `category` bits from `value`, leaving every other bit alone.
#[inline]
pub fn without_category(value: CellValue, category: Occupancy) -> CellValue {
    value & !category.bits()
}

/// Combine categories into a single cell value.
pub fn compose<I>(categories: I) -> CellValue
where
    I: IntoIterator<Item = Occupancy>,
{
    categories
        .into_iter()
        .fold(Occupancy::UNKNOWN, |acc, c| acc | c)
        .bits()
}

/// Cell counts by category.
///
/// Categories overlap, so `floor + covered + obstacle` can exceed `known()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Cells with value 0
    pub unknown: usize,
    /// Cells with the Floor bit
    pub floor: usize,
    /// Cells with the Covered bit
    pub covered: usize,
    /// Cells with the Obstacle bit
    pub obstacle: usize,
    /// Cells carrying any reserved bit
    pub extended: usize,
    /// Total cells counted
    pub total: usize,
}

impl CategoryCounts {
    /// Tally a single cell value.
    #[inline]
    pub fn add(&mut self, value: CellValue) {
        let occ = Occupancy::from_value(value);
        self.total += 1;
        if occ.is_unknown() {
            self.unknown += 1;
            return;
        }
        self.floor += occ.is_floor() as usize;
        self.covered += occ.is_covered() as usize;
        self.obstacle += occ.is_obstacle() as usize;
        self.extended += (occ.extension_bits() != 0) as usize;
    }

    /// Cells with any bit set.
    pub fn known(&self) -> usize {
        self.total - self.unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_bits() {
        assert_eq!(Occupancy::UNKNOWN.bits(), 0);
        assert_eq!(Occupancy::FLOOR.bits(), 1);
        assert_eq!(Occupancy::COVERED.bits(), 2);
        assert_eq!(Occupancy::OBSTACLE.bits(), 4);
    }

    #[test]
    fn test_bit_independence() {
        let value = with_category(0, Occupancy::OBSTACLE);
        let value = with_category(value, Occupancy::FLOOR);

        assert!(has_category(value, Occupancy::FLOOR));
        assert!(has_category(value, Occupancy::OBSTACLE));
        assert!(!has_category(value, Occupancy::COVERED));
        assert_eq!(value, 5);

        // Setting Floor again is idempotent and keeps Obstacle
        assert_eq!(with_category(value, Occupancy::FLOOR), 5);
    }

    #[test]
    fn test_has_category_ignores_other_bits() {
        for value in 0..=255u8 {
            assert_eq!(has_category(value, Occupancy::FLOOR), value & 1 != 0);
            assert_eq!(has_category(value, Occupancy::COVERED), value & 2 != 0);
            assert_eq!(has_category(value, Occupancy::OBSTACLE), value & 4 != 0);
        }
    }

    #[test]
    fn test_without_category() {
        let value = compose([Occupancy::FLOOR, Occupancy::COVERED]) | 0x80;
        let cleared = without_category(value, Occupancy::COVERED);
        assert_eq!(cleared, 0x81);
    }

    #[test]
    fn test_reserved_bits_retained() {
        let occ = Occupancy::from_value(0b1010_0001);
        assert_eq!(occ.value(), 0b1010_0001);
        assert!(occ.is_floor());
        assert_eq!(occ.extension_bits(), 0b1010_0000);
    }

    #[test]
    fn test_compose_empty_is_unknown() {
        assert_eq!(compose(std::iter::empty()), 0);
        assert!(Occupancy::from_value(0).is_unknown());
    }

    #[test]
    fn test_as_char() {
        assert_eq!(Occupancy::UNKNOWN.as_char(), '?');
        assert_eq!(Occupancy::FLOOR.as_char(), '.');
        assert_eq!((Occupancy::FLOOR | Occupancy::OBSTACLE).as_char(), 'o');
        assert_eq!((Occupancy::COVERED | Occupancy::OBSTACLE).as_char(), '#');
        assert_eq!(Occupancy::from_value(0x40).as_char(), '*');
    }

    #[test]
    fn test_category_counts() {
        let mut counts = CategoryCounts::default();
        for value in [0, 1, 3, 4, 5, 0x10] {
            counts.add(value);
        }
        assert_eq!(counts.total, 6);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.floor, 3);
        assert_eq!(counts.covered, 1);
        assert_eq!(counts.obstacle, 2);
        assert_eq!(counts.extended, 1);
        assert_eq!(counts.known(), 5);
    }
}
