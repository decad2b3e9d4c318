//! Wall placement legality and candidate generation.

use crate::core::{GameState, Move, Orientation, Side, WallSlot};

use super::paths;

/// Check that `slot` is on the board and clear of every placed wall.
#[must_use]
pub fn is_free(state: &GameState, slot: WallSlot) -> bool {
    slot.in_bounds(state.board_size()) && !state.grid().overlaps(slot)
}

/// Check that both pawns still reach their goal rows once `slot` is placed.
#[must_use]
pub fn keeps_paths_open(state: &GameState, slot: WallSlot) -> bool {
    let mut grid = *state.grid();
    grid.insert(slot);
    paths::both_sides_connected(state, &grid)
}

/// Full legality of a wall placement by `side`.
#[must_use]
pub fn is_legal_wall(state: &GameState, side: Side, slot: WallSlot) -> bool {
    state.walls_remaining(side) > 0 && is_free(state, slot) && keeps_paths_open(state, slot)
}

/// Every slot on the board, horizontal first.
pub fn all_slots(board_size: u8) -> impl Iterator<Item = WallSlot> {
    let anchors = board_size.saturating_sub(1);
    [Orientation::Horizontal, Orientation::Vertical]
        .into_iter()
        .flat_map(move |orientation| {
            (0..anchors).flat_map(move |row| {
                (0..anchors).map(move |col| WallSlot::new(orientation, row, col))
            })
        })
}

/// All legal wall placements for `side`. Empty when the side has no walls left.
#[must_use]
pub fn wall_moves(state: &GameState, side: Side) -> Vec<Move> {
    if state.walls_remaining(side) == 0 {
        return Vec::new();
    }
    all_slots(state.board_size())
        .filter(|&slot| is_free(state, slot) && keeps_paths_open(state, slot))
        .map(Move::WallPlacement)
        .collect()
}

/// Free slots likely to matter for `side`, without the path check.
///
/// Candidates are the four corners around the opponent pawn, slots that
/// touch an already placed wall, and vertical slots along the opponent's
/// column between the acting pawn and its own home edge. Duplicates are
/// removed; order follows that listing.
#[must_use]
pub fn probable_walls(state: &GameState, side: Side) -> Vec<WallSlot> {
    if state.walls_remaining(side) == 0 {
        return Vec::new();
    }
    let size = state.board_size() as i16;
    let opponent = state.pawn(side.opponent());
    let own = state.pawn(side);

    let mut candidates: Vec<(Orientation, i16, i16)> = Vec::with_capacity(64);

    let (or, oc) = (opponent.row as i16, opponent.col as i16);
    for (dr, dc) in [(0, 0), (0, -1), (-1, 0), (-1, -1)] {
        candidates.push((Orientation::Horizontal, or + dr, oc + dc));
        candidates.push((Orientation::Vertical, or + dr, oc + dc));
    }

    for wall in state.walls().iter() {
        let (r, c) = (wall.row as i16, wall.col as i16);
        match wall.orientation {
            Orientation::Horizontal => {
                candidates.push((Orientation::Horizontal, r, c - 2));
                candidates.push((Orientation::Horizontal, r, c + 2));
                for dc in -1..=1 {
                    candidates.push((Orientation::Vertical, r - 1, c + dc));
                    candidates.push((Orientation::Vertical, r + 1, c + dc));
                }
            }
            Orientation::Vertical => {
                candidates.push((Orientation::Vertical, r - 2, c));
                candidates.push((Orientation::Vertical, r + 2, c));
                for dr in -1..=1 {
                    candidates.push((Orientation::Horizontal, r + dr, c - 1));
                    candidates.push((Orientation::Horizontal, r + dr, c + 1));
                }
            }
        }
    }

    let behind = match side {
        Side::White => 0..own.row as i16,
        Side::Black => own.row as i16..size - 1,
    };
    for row in behind {
        candidates.push((Orientation::Vertical, row, oc));
        candidates.push((Orientation::Vertical, row, oc - 1));
    }

    let mut seen = [0u64; 2];
    let mut slots = Vec::with_capacity(candidates.len());
    for (orientation, row, col) in candidates {
        if row < 0 || col < 0 || row >= size - 1 || col >= size - 1 {
            continue;
        }
        let slot = WallSlot::new(orientation, row as u8, col as u8);
        let bit = 1u64 << (slot.row * 8 + slot.col);
        let mask = &mut seen[orientation as usize];
        if *mask & bit != 0 || !is_free(state, slot) {
            continue;
        }
        *mask |= bit;
        slots.push(slot);
    }
    slots
}
