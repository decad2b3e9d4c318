//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected during one search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: u64,

    /// Nodes added to the tree.
    pub nodes_expanded: u64,

    pub rollouts: u64,

    /// Rollouts that hit the ply cap and were decided by path length.
    pub truncated_rollouts: u64,

    pub max_depth: u16,

    /// Wall-clock search time in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    /// Zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Iteration rate over the measured time.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Share of rollouts cut off by the ply cap.
    #[must_use]
    pub fn truncation_rate(&self) -> f64 {
        if self.rollouts == 0 {
            0.0
        } else {
            self.truncated_rollouts as f64 / self.rollouts as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let mut stats = SearchStats::new();
        assert_eq!(stats.iterations_per_second(), 0.0);
        assert_eq!(stats.truncation_rate(), 0.0);

        stats.iterations = 1000;
        stats.time_us = 500_000;
        stats.rollouts = 8;
        stats.truncated_rollouts = 2;

        assert_eq!(stats.iterations_per_second(), 2000.0);
        assert_eq!(stats.truncation_rate(), 0.25);

        stats.reset();
        assert_eq!(stats.iterations, 0);
    }
}
