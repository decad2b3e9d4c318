//! # quoridor-engine
//!
//! Quoridor rules, move search and a match controller.
//!
//! ## Design Principles
//!
//! 1. **One Writer**: Only the match controller mutates a live game. Search
//!    works on its own copies and hands back a move, never a state.
//!
//! 2. **Validate Everything**: Every submitted move is checked against the
//!    legal move list. A rejected move leaves the game unchanged.
//!
//! 3. **Byte Boundary**: Moves cross process boundaries as a single byte
//!    (see `codec`), positions as an `EngineQuery`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` for search.
//!
//! - **Bounded Search**: Every search takes a `SearchBudget` (depth, nodes
//!   or milliseconds) and always returns a legal move.
//!
//! ## Modules
//!
//! - `core`: Sides, cells, walls, moves, state, RNG, configuration, errors
//! - `codec`: One-byte move codes
//! - `rules`: RulesEngine trait and the Quoridor rules
//! - `search`: Alpha-beta search, evaluation and the `best_move` entry point
//! - `mcts`: Monte Carlo Tree Search with shortest-path rollouts
//! - `api`: Stateless engine boundary over move codes
//! - `config`: TOML engine configuration
//! - `controller`: Matches, transcripts, replay and self-play

pub mod api;
pub mod codec;
pub mod config;
pub mod controller;
pub mod core;
pub mod mcts;
pub mod rules;
pub mod search;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Direction, EngineError, GameConfig, GameRng, GameState, Move, MoveRecord, Orientation,
    Position, Result, Side, SideMap, WallSlot,
};

pub use crate::rules::{GameResult, Quoridor, RulesEngine};

pub use crate::search::{best_move, SearchBudget, SearchConfig, Strategy};

pub use crate::mcts::{MCTSConfig, MCTSSearch};

pub use crate::api::EngineQuery;

pub use crate::config::EngineConfig;

pub use crate::controller::{Match, Replay, Transcript};
