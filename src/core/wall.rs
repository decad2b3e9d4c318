//! Wall slots and the occupancy grid.
//!
//! ## Geometry
//!
//! A wall is addressed by the gap intersection at its top-left corner
//! (the *anchor*) and spans two cell edges:
//!
//! - Horizontal `(r, c)` separates rows `r` and `r + 1` in columns `c` and `c + 1`.
//! - Vertical `(r, c)` separates columns `c` and `c + 1` in rows `r` and `r + 1`.
//!
//! ## WallGrid
//!
//! Two 64-bit masks, one per orientation, indexed `row * 8 + col`. Anchors
//! never exceed 7, so the grid covers every supported board size.

use serde::{Deserialize, Serialize};

use super::position::{Direction, Position};

/// Largest anchor coordinate expressible by the grid and the move codec.
pub const MAX_ANCHOR: u8 = 7;

/// Wall orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Check if this is horizontal.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }
}

/// A wall position on the gap grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallSlot {
    pub orientation: Orientation,
    pub row: u8,
    pub col: u8,
}

impl WallSlot {
    /// Wall with anchor `(row, col)`.
    #[must_use]
    pub const fn new(orientation: Orientation, row: u8, col: u8) -> Self {
        Self { orientation, row, col }
    }

    /// Horizontal wall with anchor `(row, col)`.
    #[must_use]
    pub const fn horizontal(row: u8, col: u8) -> Self {
        Self::new(Orientation::Horizontal, row, col)
    }

    /// Vertical wall with anchor `(row, col)`.
    #[must_use]
    pub const fn vertical(row: u8, col: u8) -> Self {
        Self::new(Orientation::Vertical, row, col)
    }

    /// Check that the wall lies fully inside a `board_size` square board.
    #[must_use]
    pub const fn in_bounds(self, board_size: u8) -> bool {
        self.row + 1 < board_size && self.col + 1 < board_size
    }

    #[inline]
    const fn bit(self) -> u64 {
        1u64 << (self.row as u32 * 8 + self.col as u32)
    }
}

impl std::fmt::Display for WallSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.orientation {
            Orientation::Horizontal => write!(f, "{}-{}", self.row, self.col),
            Orientation::Vertical => write!(f, "{}|{}", self.row, self.col),
        }
    }
}

/// Occupancy of every wall slot on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallGrid {
    horizontal: u64,
    vertical: u64,
}

impl WallGrid {
    /// Empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            horizontal: 0,
            vertical: 0,
        }
    }

    /// Slot test that tolerates coordinates off the gap grid.
    #[inline]
    fn has(&self, orientation: Orientation, row: i16, col: i16) -> bool {
        let max = MAX_ANCHOR as i16;
        if !(0..=max).contains(&row) || !(0..=max).contains(&col) {
            return false;
        }
        self.contains(WallSlot::new(orientation, row as u8, col as u8))
    }

    /// Check if exactly `slot` is occupied.
    #[inline]
    #[must_use]
    pub fn contains(&self, slot: WallSlot) -> bool {
        match slot.orientation {
            Orientation::Horizontal => self.horizontal & slot.bit() != 0,
            Orientation::Vertical => self.vertical & slot.bit() != 0,
        }
    }

    /// Mark a slot occupied. Anchors must not exceed [`MAX_ANCHOR`].
    pub fn insert(&mut self, slot: WallSlot) {
        debug_assert!(slot.row <= MAX_ANCHOR && slot.col <= MAX_ANCHOR);
        match slot.orientation {
            Orientation::Horizontal => self.horizontal |= slot.bit(),
            Orientation::Vertical => self.vertical |= slot.bit(),
        }
    }

    /// Clear `slot`.
    pub fn remove(&mut self, slot: WallSlot) {
        match slot.orientation {
            Orientation::Horizontal => self.horizontal &= !slot.bit(),
            Orientation::Vertical => self.vertical &= !slot.bit(),
        }
    }

    /// Number of walls on the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.horizontal.count_ones() + self.vertical.count_ones()) as usize
    }

    /// Check if no wall is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal == 0 && self.vertical == 0
    }

    /// Check whether `slot` would overlap or cross a wall already on the grid.
    ///
    /// A slot conflicts with the same slot, with the crossing wall of the
    /// other orientation at the same anchor, and with the two walls of its own
    /// orientation that would share one of its edges.
    #[must_use]
    pub fn overlaps(&self, slot: WallSlot) -> bool {
        let (r, c) = (slot.row as i16, slot.col as i16);
        let crossing = match slot.orientation {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        };
        if self.contains(slot) || self.has(crossing, r, c) {
            return true;
        }
        match slot.orientation {
            Orientation::Horizontal => {
                self.has(Orientation::Horizontal, r, c - 1)
                    || self.has(Orientation::Horizontal, r, c + 1)
            }
            Orientation::Vertical => {
                self.has(Orientation::Vertical, r - 1, c)
                    || self.has(Orientation::Vertical, r + 1, c)
            }
        }
    }

    /// Check whether a wall blocks the edge leaving `from` in `dir`.
    ///
    /// Board edges are not considered here; callers check bounds separately.
    #[must_use]
    pub fn blocks(&self, from: Position, dir: Direction) -> bool {
        let (r, c) = (from.row as i16, from.col as i16);
        match dir {
            Direction::South => {
                self.has(Orientation::Horizontal, r, c)
                    || self.has(Orientation::Horizontal, r, c - 1)
            }
            Direction::North => {
                self.has(Orientation::Horizontal, r - 1, c)
                    || self.has(Orientation::Horizontal, r - 1, c - 1)
            }
            Direction::East => {
                self.has(Orientation::Vertical, r, c)
                    || self.has(Orientation::Vertical, r - 1, c)
            }
            Direction::West => {
                self.has(Orientation::Vertical, r, c - 1)
                    || self.has(Orientation::Vertical, r - 1, c - 1)
            }
        }
    }

    /// Iterate over occupied slots in anchor order, horizontal first.
    pub fn iter(&self) -> impl Iterator<Item = WallSlot> + '_ {
        let mask_slots = |mask: u64, orientation: Orientation| {
            (0..64u8)
                .filter(move |bit| mask & (1u64 << bit) != 0)
                .map(move |bit| WallSlot::new(orientation, bit / 8, bit % 8))
        };
        mask_slots(self.horizontal, Orientation::Horizontal)
            .chain(mask_slots(self.vertical, Orientation::Vertical))
    }

    /// Raw masks, used for position hashing.
    #[must_use]
    pub const fn masks(&self) -> (u64, u64) {
        (self.horizontal, self.vertical)
    }
}
