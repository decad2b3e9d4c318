//! Rules engine trait.
//!
//! Search and the match controller only talk to the game through this trait:
//! - What moves are legal
//! - How a move changes the state
//! - Whether the game is over

use tracing::debug;

use crate::core::{EngineError, GameConfig, GameState, Move, Result, Side};

/// Result of a finished game. Quoridor has no draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Side,
}

impl GameResult {
    /// Result with `winner` as the winner.
    #[must_use]
    pub const fn new(winner: Side) -> Self {
        Self { winner }
    }

    /// Check if `side` won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        self.winner == side
    }

    /// 1.0 for the winner, 0.0 for the loser.
    #[must_use]
    pub fn reward(&self, side: Side) -> f64 {
        if self.is_winner(side) {
            1.0
        } else {
            0.0
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: empty on a terminal state; order carries no meaning
/// - `apply_move`: only called with moves taken from `legal_moves`
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Every legal move for `side`.
    fn legal_moves(&self, state: &GameState, side: Side) -> Vec<Move>;

    /// Apply an already-validated move. Must be deterministic.
    fn apply_move(&self, state: &mut GameState, side: Side, mv: Move);

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Moves worth searching below the root. Defaults to every legal move.
    fn candidate_moves(&self, state: &GameState, side: Side) -> Vec<Move> {
        self.legal_moves(state, side)
    }

    /// Check a single move against the legal move list.
    fn is_legal(&self, state: &GameState, side: Side, mv: Move) -> bool {
        self.legal_moves(state, side).contains(&mv)
    }

    /// Validate and apply a move, leaving `state` untouched on error.
    fn try_apply(&self, state: &mut GameState, side: Side, mv: Move) -> Result<()> {
        if let Some(result) = self.is_terminal(state) {
            return Err(EngineError::TerminalState {
                winner: result.winner,
            });
        }
        if !self.is_legal(state, side, mv) {
            debug!(%mv, %side, "rejected illegal move");
            return Err(EngineError::IllegalMove { mv, side });
        }
        self.apply_move(state, side, mv);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::new(Side::Black);
        assert!(!result.is_winner(Side::White));
        assert!(result.is_winner(Side::Black));
        assert_eq!(result.reward(Side::Black), 1.0);
        assert_eq!(result.reward(Side::White), 0.0);
    }
}
