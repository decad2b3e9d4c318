//! Board cells and orthogonal directions.
//!
//! Rows grow from White's home row (0) towards Black's home row.
//! Columns grow from left to right.

use serde::{Deserialize, Serialize};

/// A cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check that both coordinates fall inside a `board_size` square board.
    #[inline]
    #[must_use]
    pub const fn in_bounds(self, board_size: u8) -> bool {
        self.row < board_size && self.col < board_size
    }

    /// Dense index for per-cell scratch arrays.
    #[inline]
    #[must_use]
    pub const fn index(self, board_size: u8) -> usize {
        self.row as usize * board_size as usize + self.col as usize
    }

    /// Inverse of [`Position::index`].
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize, board_size: u8) -> Self {
        Self {
            row: (index / board_size as usize) as u8,
            col: (index % board_size as usize) as u8,
        }
    }

    /// Translate by a signed offset, returning `None` if the result leaves the board.
    #[must_use]
    pub fn offset(self, d_row: i8, d_col: i8, board_size: u8) -> Option<Position> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        let size = board_size as i16;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Position::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Adjacent cell in `dir`, if on the board.
    #[inline]
    #[must_use]
    pub fn step(self, dir: Direction, board_size: u8) -> Option<Position> {
        let (d_row, d_col) = dir.delta();
        self.offset(d_row, d_col, board_size)
    }

    /// Signed (row, col) difference `other - self`.
    #[must_use]
    pub fn delta_to(self, other: Position) -> (i8, i8) {
        (
            other.row as i8 - self.row as i8,
            other.col as i8 - self.col as i8,
        )
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Orthogonal direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    North,
    /// Towards the last row.
    South,
    /// Towards column 0.
    West,
    /// Towards the last column.
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    /// Row and column offset of one step.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    /// The two directions at right angles to this one.
    #[must_use]
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::North | Direction::South => [Direction::West, Direction::East],
            Direction::West | Direction::East => [Direction::North, Direction::South],
        }
    }

    /// Direction of a unit offset, if it is one.
    #[must_use]
    pub const fn from_delta(d_row: i8, d_col: i8) -> Option<Direction> {
        match (d_row, d_col) {
            (-1, 0) => Some(Direction::North),
            (1, 0) => Some(Direction::South),
            (0, -1) => Some(Direction::West),
            (0, 1) => Some(Direction::East),
            _ => None,
        }
    }
}
