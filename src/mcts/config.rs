//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    /// UCB1 exploration constant (default: sqrt(2)).
    pub exploration_constant: f64,

    /// Bonus added to the reward sum of the edge that follows the
    /// shortest path. Decays as the edge collects visits.
    pub heuristic_bonus: f64,

    /// Maximum nodes to allocate in the tree.
    pub max_nodes: usize,

    /// Plies a rollout may play before the closer side is declared winner.
    pub rollout_depth: u32,

    /// Rollouts follow the shortest path with probability `(k - 1) / k`
    /// and pick a random probable move otherwise.
    pub rollout_policy_parameter: u32,

    /// Random seed. Same seed produces the same search.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            heuristic_bonus: 100.0,
            max_nodes: 200_000,
            rollout_depth: 40,
            rollout_policy_parameter: 4,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    /// Set the UCB1 exploration constant.
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Set the bonus credited to the shortest-path step.
    #[must_use]
    pub fn with_heuristic_bonus(mut self, bonus: f64) -> Self {
        self.heuristic_bonus = bonus;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the tree size limit.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Set the rollout ply cap.
    #[must_use]
    pub fn with_rollout_depth(mut self, plies: u32) -> Self {
        self.rollout_depth = plies;
        self
    }

    /// Set `k`: rollouts take the shortest-path step with probability `1 - 1/k`.
    #[must_use]
    pub fn with_rollout_policy_parameter(mut self, k: u32) -> Self {
        self.rollout_policy_parameter = k;
        self
    }
}
