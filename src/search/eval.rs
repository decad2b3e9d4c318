//! Static evaluation.
//!
//! Scores are from the point of view of the side passed in: positive means
//! that side is ahead.

use crate::core::{GameState, Side};
use crate::rules::paths::{self, MAX_CELLS};

use super::config::EvalWeights;

/// Score of a won position, before ply adjustment.
pub const WIN_SCORE: i32 = 1_000_000;

/// Scores at or beyond this magnitude are forced wins or losses.
pub const WIN_THRESHOLD: i32 = WIN_SCORE - 1_000;

/// Evaluate `state` for `side`.
///
/// Won and lost positions score `±WIN_SCORE`. Otherwise the score is the
/// weighted shortest-path lead plus the weighted wall-supply lead, clamped
/// strictly inside `±WIN_THRESHOLD`.
#[must_use]
pub fn evaluate(state: &GameState, side: Side, weights: &EvalWeights) -> i32 {
    if let Some(winner) = state.winner() {
        return if winner == side { WIN_SCORE } else { -WIN_SCORE };
    }
    let opponent = side.opponent();
    let unreachable = MAX_CELLS as u32;
    let own = paths::side_distance(state, side).unwrap_or(unreachable) as i64;
    let theirs = paths::side_distance(state, opponent).unwrap_or(unreachable) as i64;
    let supply = state.walls_remaining(side) as i64 - state.walls_remaining(opponent) as i64;

    let score = weights.path as i64 * (theirs - own) + weights.walls as i64 * supply;
    let bound = (WIN_THRESHOLD - 1) as i64;
    score.clamp(-bound, bound) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Position, SideMap, WallSlot};

    #[test]
    fn test_symmetric_start_is_even() {
        let state = GameState::new(&GameConfig::default()).unwrap();
        let weights = EvalWeights::default();
        assert_eq!(evaluate(&state, Side::White, &weights), 0);
        assert_eq!(evaluate(&state, Side::Black, &weights), 0);
    }

    #[test]
    fn test_path_lead_scores_positive() {
        let state = GameState::from_parts(
            &GameConfig::default(),
            SideMap::from_pair(Position::new(5, 4), Position::new(8, 4)),
            &[],
            SideMap::with_value(10),
            Side::Black,
        )
        .unwrap();
        let weights = EvalWeights::default();

        // White needs 3, Black needs 8.
        assert_eq!(evaluate(&state, Side::White, &weights), 50);
        assert_eq!(evaluate(&state, Side::Black, &weights), -50);
    }

    #[test]
    fn test_wall_supply_counts() {
        let state = GameState::from_parts(
            &GameConfig::default(),
            SideMap::from_pair(Position::new(0, 4), Position::new(8, 4)),
            &[WallSlot::horizontal(0, 0)],
            SideMap::from_pair(9, 10),
            Side::Black,
        )
        .unwrap();
        let weights = EvalWeights { path: 0, walls: 5 };
        assert_eq!(evaluate(&state, Side::Black, &weights), 5);
    }

    #[test]
    fn test_huge_weights_stay_below_win_threshold() {
        let state = GameState::from_parts(
            &GameConfig::default(),
            SideMap::from_pair(Position::new(5, 4), Position::new(8, 4)),
            &[],
            SideMap::with_value(10),
            Side::Black,
        )
        .unwrap();
        let weights = EvalWeights { path: i32::MAX, walls: 0 };

        assert_eq!(evaluate(&state, Side::White, &weights), WIN_THRESHOLD - 1);
        assert_eq!(evaluate(&state, Side::Black, &weights), -(WIN_THRESHOLD - 1));
    }

    #[test]
    fn test_terminal_scores() {
        let state = GameState::from_parts(
            &GameConfig::default(),
            SideMap::from_pair(Position::new(3, 3), Position::new(0, 1)),
            &[],
            SideMap::with_value(10),
            Side::White,
        )
        .unwrap();
        let weights = EvalWeights::default();
        assert_eq!(evaluate(&state, Side::Black, &weights), WIN_SCORE);
        assert_eq!(evaluate(&state, Side::White, &weights), -WIN_SCORE);
    }
}
