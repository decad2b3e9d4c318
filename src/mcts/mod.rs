//! Monte Carlo Tree Search.
//!
//! ## Overview
//!
//! - **Arena tree**: nodes in a flat `Vec`, linked by `NodeId`
//! - **Two-sided**: every node selects for its own side to move
//! - **Heuristic bonus**: the shortest-path step starts with extra credit
//! - **Shortest-path rollouts**: capped at a fixed ply count, after which
//!   the side closer to its goal row wins
//!
//! ## Usage
//!
//! ```rust
//! use quoridor_engine::core::Side;
//! use quoridor_engine::mcts::{MCTSConfig, MCTSSearch};
//! use quoridor_engine::rules::Quoridor;
//! use quoridor_engine::search::SearchBudget;
//!
//! let rules = Quoridor::default();
//! let state = rules.initial_state().unwrap();
//! let mut search = MCTSSearch::new(rules, MCTSConfig::default());
//!
//! let mv = search.search(&state, Side::White, SearchBudget::Nodes(100)).unwrap();
//! println!("best move: {}", mv);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::MCTSConfig;
pub use node::{Edge, MCTSNode, NodeId};
pub use policy::{
    closer_side, RandomSimulation, RolloutOutcome, SelectionPolicy, ShortestPathSimulation,
    SimulationPolicy, UCB1,
};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
