//! Quoridor rules.
//!
//! - `engine`: the `RulesEngine` trait search and controllers program against
//! - `paths`: BFS reachability and shortest distances
//! - `pawn`: step, jump and side-step generation
//! - `walls`: overlap, path-preservation and probable placements
//! - `quoridor`: the standard rule set

pub mod engine;
pub mod paths;
pub mod pawn;
pub mod quoridor;
pub mod walls;

pub use engine::{GameResult, RulesEngine};
pub use quoridor::Quoridor;
