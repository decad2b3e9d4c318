//! Engine-versus-engine matches.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{GameConfig, Result, Side};

use super::players::Player;
use super::session::Match;
use super::transcript::Transcript;

/// Settings for a self-play run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Board to play on.
    pub game: GameConfig,

    /// Plies after which an unfinished match is abandoned.
    pub max_plies: usize,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            max_plies: 300,
        }
    }
}

impl SelfPlayConfig {
    /// Set the board to play on.
    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Set the ply limit.
    #[must_use]
    pub fn with_max_plies(mut self, max: usize) -> Self {
        self.max_plies = max;
        self
    }
}

/// Result of one self-play match.
#[derive(Clone, Debug)]
pub struct MatchOutcome {
    /// `None` when the ply limit was hit first.
    pub winner: Option<Side>,
    pub plies: usize,
    pub transcript: Transcript,
}

/// Play one match between `white` and `black`.
pub fn play_match(
    config: &SelfPlayConfig,
    white: &mut dyn Player,
    black: &mut dyn Player,
) -> Result<MatchOutcome> {
    let mut game = Match::new(config.game.clone())?;
    info!(white = white.name(), black = black.name(), "self-play match started");

    while !game.is_over() && game.history().len() < config.max_plies {
        match game.side_to_move() {
            Side::White => game.play_turn(white)?,
            Side::Black => game.play_turn(black)?,
        };
    }

    let outcome = MatchOutcome {
        winner: game.winner(),
        plies: game.history().len(),
        transcript: game.transcript(),
    };
    match outcome.winner {
        Some(winner) => info!(%winner, plies = outcome.plies, "self-play match finished"),
        None => info!(plies = outcome.plies, "self-play match abandoned at ply limit"),
    }
    Ok(outcome)
}
