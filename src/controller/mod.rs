//! Match controller: the sole writer of a game's state.
//!
//! - `session`: `Match`, validated moves, history and undo
//! - `transcript`: transcript files and saved-match naming
//! - `replay`: one-move-at-a-time playback for spectators
//! - `players`: engine and random move sources
//! - `self_play`: engine-versus-engine matches

pub mod players;
pub mod replay;
pub mod self_play;
pub mod session;
pub mod transcript;

pub use players::{EnginePlayer, Player, RandomPlayer};
pub use replay::Replay;
pub use self_play::{play_match, MatchOutcome, SelfPlayConfig};
pub use session::Match;
pub use transcript::{saved_name, Transcript};
