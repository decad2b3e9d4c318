//! Search configuration: strategy, budget and evaluation weights.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};
use crate::mcts::MCTSConfig;

/// How much work a single `best_move` call may do.
///
/// The unit is a caller choice. `Nodes` is the default because it gives the
/// same answer on every machine; `TimeMs` bounds wall-clock time instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum SearchBudget {
    /// Full-width plies (alpha-beta only).
    Depth(u32),
    /// Visited nodes for alpha-beta, iterations for MCTS.
    Nodes(u64),
    /// Wall-clock milliseconds.
    TimeMs(u64),
}

impl SearchBudget {
    /// Reject budgets that allow no work at all.
    pub fn validate(self) -> Result<()> {
        let zero = match self {
            SearchBudget::Depth(d) => d == 0,
            SearchBudget::Nodes(n) => n == 0,
            SearchBudget::TimeMs(ms) => ms == 0,
        };
        if zero {
            Err(EngineError::ZeroBudget)
        } else {
            Ok(())
        }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::Nodes(50_000)
    }
}

impl std::fmt::Display for SearchBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchBudget::Depth(d) => write!(f, "depth {}", d),
            SearchBudget::Nodes(n) => write!(f, "{} nodes", n),
            SearchBudget::TimeMs(ms) => write!(f, "{} ms", ms),
        }
    }
}

/// Search algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Iterative-deepening negamax with alpha-beta pruning.
    #[default]
    AlphaBeta,
    /// Monte Carlo tree search with shortest-path rollouts.
    Mcts,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::AlphaBeta => write!(f, "alpha-beta"),
            Strategy::Mcts => write!(f, "mcts"),
        }
    }
}

/// Weights of the static evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Per step of shortest-path advantage.
    pub path: i32,
    /// Per wall of supply advantage.
    pub walls: i32,
}

/// Largest weight magnitude accepted. Keeps every non-terminal score far
/// below the win threshold.
pub const MAX_EVAL_WEIGHT: i32 = 1_000;

impl EvalWeights {
    /// Reject weights large enough to be mistaken for a forced win.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [("path", self.path), ("walls", self.walls)] {
            if weight.unsigned_abs() > MAX_EVAL_WEIGHT as u32 {
                return Err(EngineError::invalid_config(format!(
                    "{} weight {} outside -{}..={}",
                    name, weight, MAX_EVAL_WEIGHT, MAX_EVAL_WEIGHT
                )));
            }
        }
        Ok(())
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self { path: 10, walls: 5 }
    }
}

/// Search configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: Strategy,

    pub budget: SearchBudget,

    pub weights: EvalWeights,

    /// Restrict wall candidates below the root to probable placements.
    /// The root always considers every legal move.
    pub wall_pruning: bool,

    /// MCTS parameters, used when `strategy` is `Mcts`.
    pub mcts: MCTSConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::AlphaBeta,
            budget: SearchBudget::default(),
            weights: EvalWeights::default(),
            wall_pruning: true,
            mcts: MCTSConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Check the budget and the evaluation weights.
    pub fn validate(&self) -> Result<()> {
        self.budget.validate()?;
        self.weights.validate()
    }

    /// Set the search algorithm.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the search budget.
    #[must_use]
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Set the evaluation weights.
    #[must_use]
    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Restrict inner nodes to probable walls.
    #[must_use]
    pub fn with_wall_pruning(mut self, enabled: bool) -> Self {
        self.wall_pruning = enabled;
        self
    }

    /// Set the MCTS parameters.
    #[must_use]
    pub fn with_mcts(mut self, mcts: MCTSConfig) -> Self {
        self.mcts = mcts;
        self
    }
}
