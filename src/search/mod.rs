//! Search oracle: pick a move for a side in a given position.
//!
//! - `config`: strategy, budget and evaluation weights
//! - `eval`: static evaluation used by alpha-beta
//! - `alphabeta`: iterative-deepening negamax
//!
//! [`best_move`] is the single entry point. It never mutates the caller's
//! state and always returns a move from the full legal list.

pub mod alphabeta;
pub mod config;
pub mod eval;

pub use alphabeta::{AlphaBeta, SearchResult, MAX_DEPTH};
pub use config::{EvalWeights, SearchBudget, SearchConfig, Strategy, MAX_EVAL_WEIGHT};
pub use eval::{evaluate, WIN_SCORE, WIN_THRESHOLD};

use tracing::{info, instrument};

use crate::core::{EngineError, GameState, Move, Result, Side};
use crate::mcts::MCTSSearch;
use crate::rules::Quoridor;

/// Best move for `side` in `state` under `config`.
///
/// The searched position is `state` with `side` to move, whatever the
/// state's own turn marker says.
///
/// # Errors
///
/// - `ZeroBudget` when the budget allows no work
/// - `InvalidConfig` when an evaluation weight is out of range
/// - `TerminalState` when a pawn already stands on its goal row
/// - `UnsupportedBudget` for a depth budget with MCTS
/// - `InvalidState` when `side` has no legal move
#[instrument(skip(state, config), fields(strategy = %config.strategy, budget = %config.budget))]
pub fn best_move(state: &GameState, side: Side, config: &SearchConfig) -> Result<Move> {
    config.validate()?;
    if let Some(winner) = state.winner() {
        return Err(EngineError::TerminalState { winner });
    }
    let rules = Quoridor::for_state(state);
    let root = state.clone().with_to_move(side);

    match config.strategy {
        Strategy::AlphaBeta => {
            let result = AlphaBeta::new(&rules, config)?.search(&root, side)?;
            info!(
                best = %result.best_move,
                score = result.score,
                depth = result.depth,
                nodes = result.nodes,
                "alpha-beta search finished"
            );
            Ok(result.best_move)
        }
        Strategy::Mcts => {
            let mut search =
                MCTSSearch::new(rules, config.mcts.clone()).with_wall_pruning(config.wall_pruning);
            let mv = search.search(&root, side, config.budget)?;
            let stats = search.stats();
            info!(
                best = %mv,
                iterations = stats.iterations,
                rollouts = stats.rollouts,
                truncated = stats.truncated_rollouts,
                "mcts search finished"
            );
            Ok(mv)
        }
    }
}
