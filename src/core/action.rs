//! Move representation.
//!
//! A move is either a pawn displacement or a wall placement. Pawn moves are
//! stored as a relative delta so the same value means the same thing for
//! either side:
//! - magnitude 1 on one axis: orthogonal step
//! - magnitude 2 on one axis: straight jump over the opponent
//! - magnitude 1 on both axes: diagonal side-step around the opponent
//!
//! Moves are plain values. Whether a move is legal in a given position is
//! decided by the rules engine, not here.

use serde::{Deserialize, Serialize};

use super::player::Side;
use super::position::Direction;
use super::wall::{Orientation, WallSlot};

/// A single move by one side.
///
/// ## Example
///
/// ```
/// use quoridor_engine::core::{Direction, Move, WallSlot};
///
/// let step = Move::step(Direction::South);
/// let jump = Move::pawn(2, 0);
/// let wall = Move::WallPlacement(WallSlot::vertical(3, 4));
///
/// assert_eq!(step.to_string(), "Pawn(1,0)");
/// assert_eq!(jump.to_string(), "Pawn(2,0)");
/// assert_eq!(wall.to_string(), "Wall(3|4)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Pawn displacement relative to its current cell.
    PawnStep { d_row: i8, d_col: i8 },
    /// Wall dropped onto a free slot.
    WallPlacement(WallSlot),
}

impl Move {
    /// Pawn move by `(d_row, d_col)`.
    #[must_use]
    pub const fn pawn(d_row: i8, d_col: i8) -> Self {
        Move::PawnStep { d_row, d_col }
    }

    /// One orthogonal step in `dir`.
    #[must_use]
    pub const fn step(dir: Direction) -> Self {
        let (d_row, d_col) = dir.delta();
        Move::PawnStep { d_row, d_col }
    }

    /// Wall placement at anchor `(row, col)`.
    #[must_use]
    pub const fn wall(orientation: Orientation, row: u8, col: u8) -> Self {
        Move::WallPlacement(WallSlot::new(orientation, row, col))
    }

    /// Check if this is a wall placement.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self, Move::WallPlacement(_))
    }

    /// Check if this is a pawn move.
    #[must_use]
    pub const fn is_pawn(&self) -> bool {
        matches!(self, Move::PawnStep { .. })
    }

    /// The wall slot, for wall placements.
    #[must_use]
    pub const fn wall_slot(&self) -> Option<WallSlot> {
        match self {
            Move::WallPlacement(slot) => Some(*slot),
            Move::PawnStep { .. } => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::PawnStep { d_row, d_col } => write!(f, "Pawn({},{})", d_row, d_col),
            Move::WallPlacement(slot) => write!(f, "Wall({})", slot),
        }
    }
}

/// A committed move with its position in the match transcript.
///
/// Created by the match controller when a move is applied. The ordered
/// list of records is the full game transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The move played.
    pub mv: Move,

    /// Side that played it.
    pub side: Side,

    /// Zero-based ply index within the match.
    pub sequence: u32,
}

impl MoveRecord {
    /// Record `mv` by `side` at position `sequence` in the transcript.
    #[must_use]
    pub const fn new(mv: Move, side: Side, sequence: u32) -> Self {
        Self { mv, side, sequence }
    }

    /// Check if White made the move.
    #[must_use]
    pub const fn was_white(&self) -> bool {
        self.side.is_white()
    }
}
