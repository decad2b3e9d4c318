//! Pawn move generation: steps, straight jumps and diagonal side-steps.

use smallvec::SmallVec;

use crate::core::{GameState, Move, Side};

use super::paths;

/// At most three plain steps plus two side-steps.
pub type PawnMoves = SmallVec<[Move; 6]>;

/// All legal pawn moves for `side`.
///
/// For each open direction the pawn either steps onto the empty cell, jumps
/// over the opponent when the cell beyond is open, or, when the jump is cut
/// by a wall or the board edge, side-steps to either cell beside the
/// opponent that is not walled off from it.
#[must_use]
pub fn pawn_moves(state: &GameState, side: Side) -> PawnMoves {
    let size = state.board_size();
    let grid = state.grid();
    let from = state.pawn(side);
    let opponent = state.pawn(side.opponent());
    let mut moves = PawnMoves::new();

    for dir in crate::core::Direction::ALL {
        if grid.blocks(from, dir) {
            continue;
        }
        let Some(next) = from.step(dir, size) else {
            continue;
        };
        if next != opponent {
            moves.push(Move::step(dir));
            continue;
        }

        let beyond = next.step(dir, size).filter(|_| !grid.blocks(next, dir));
        if let Some(far) = beyond {
            let (d_row, d_col) = from.delta_to(far);
            moves.push(Move::pawn(d_row, d_col));
            continue;
        }

        for side_dir in dir.perpendicular() {
            if grid.blocks(next, side_dir) {
                continue;
            }
            if let Some(cell) = next.step(side_dir, size) {
                let (d_row, d_col) = from.delta_to(cell);
                moves.push(Move::pawn(d_row, d_col));
            }
        }
    }
    moves
}

/// The pawn move that follows a shortest path to the goal row.
///
/// Prefers the move onto the next path cell; if the opponent sits there,
/// the jump onto the cell after it. Falls back to the first legal pawn move
/// when the path is unusable. `None` only when the pawn cannot move at all.
#[must_use]
pub fn shortest_path_step(state: &GameState, side: Side) -> Option<Move> {
    let moves = pawn_moves(state, side);
    let size = state.board_size();
    let from = state.pawn(side);

    let path = paths::shortest_path(state.grid(), size, from, side.goal_row(size))
        .unwrap_or_default();
    let lands_on = |mv: &Move, index: usize| match (mv, path.get(index)) {
        (Move::PawnStep { d_row, d_col }, Some(&cell)) => {
            from.offset(*d_row, *d_col, size) == Some(cell)
        }
        _ => false,
    };

    moves
        .iter()
        .find(|mv| lands_on(mv, 0))
        .or_else(|| moves.iter().find(|mv| lands_on(mv, 1)))
        .or_else(|| moves.first())
        .copied()
}
