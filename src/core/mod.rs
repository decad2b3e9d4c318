//! Core engine types: sides, cells, walls, moves, state, RNG, configuration.
//!
//! Everything here is a plain value type. Rules live in `rules`, search in
//! `search` and `mcts`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod position;
pub mod rng;
pub mod state;
pub mod wall;

pub use action::{Move, MoveRecord};
pub use config::{GameConfig, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use error::{EngineError, Result};
pub use player::{Side, SideMap};
pub use position::{Direction, Position};
pub use rng::GameRng;
pub use state::GameState;
pub use wall::{Orientation, WallGrid, WallSlot, MAX_ANCHOR};
