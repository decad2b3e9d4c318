//! Sides and per-side data storage.
//!
//! ## Side
//!
//! Quoridor is strictly two-player. White starts on row 0 and races to the
//! last row; Black starts on the last row and races to row 0.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for pawns, wall counts and
//! search rewards.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Both sides, White first.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// Build a side from the boundary's `is_white` flag.
    #[must_use]
    pub const fn from_is_white(is_white: bool) -> Self {
        if is_white {
            Side::White
        } else {
            Side::Black
        }
    }

    /// Check if this is White.
    #[must_use]
    pub const fn is_white(self) -> bool {
        matches!(self, Side::White)
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Slot index (White = 0, Black = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Row this side must reach to win on a board of `board_size` rows.
    #[must_use]
    pub const fn goal_row(self, board_size: u8) -> u8 {
        match self {
            Side::White => board_size - 1,
            Side::Black => 0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use quoridor_engine::core::{Side, SideMap};
///
/// let mut walls: SideMap<u8> = SideMap::with_value(10);
/// walls[Side::Black] -= 1;
///
/// assert_eq!(walls[Side::White], 10);
/// assert_eq!(walls[Side::Black], 9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create from explicit White and Black values.
    #[must_use]
    pub const fn from_pair(white: T, black: T) -> Self {
        Self { data: [white, black] }
    }

    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::White), factory(Side::Black)],
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Value for `side`.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Mutable value for `side`.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, White first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
