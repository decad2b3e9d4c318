//! Move sources a match can be driven by.

use crate::core::{EngineError, GameRng, GameState, Move, Result, Side};
use crate::rules::{Quoridor, RulesEngine};
use crate::search::{self, SearchConfig};

/// Something that picks moves: the search engine, a random mover, a human
/// front end.
pub trait Player {
    fn name(&self) -> &str;

    /// Pick a move for `side`. The move must be legal in `state`.
    fn choose_move(&mut self, state: &GameState, side: Side) -> Result<Move>;
}

/// Plays the search oracle's best move.
#[derive(Clone, Debug)]
pub struct EnginePlayer {
    name: String,
    config: SearchConfig,
}

impl EnginePlayer {
    /// Engine player searching with `config`.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let name = format!("{} ({})", config.strategy, config.budget);
        Self { name, config }
    }

    /// Search settings this player uses.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Player for EnginePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, state: &GameState, side: Side) -> Result<Move> {
        search::best_move(state, side, &self.config)
    }
}

/// Plays a uniformly random legal move.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    /// Random player seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, state: &GameState, side: Side) -> Result<Move> {
        let legal = Quoridor::for_state(state).legal_moves(state, side);
        self.rng
            .choose(&legal)
            .copied()
            .ok_or_else(|| EngineError::invalid_state(format!("{} has no legal moves", side)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Position, SideMap};
    use crate::search::SearchBudget;

    #[test]
    fn test_players_pick_legal_moves() {
        let rules = Quoridor::default();
        let state = rules.initial_state().unwrap();
        let legal = rules.legal_moves(&state, Side::White);

        let mut engine = EnginePlayer::new(SearchConfig::default().with_budget(SearchBudget::Depth(1)));
        let mut random = RandomPlayer::new(3);

        assert!(legal.contains(&engine.choose_move(&state, Side::White).unwrap()));
        assert!(legal.contains(&random.choose_move(&state, Side::White).unwrap()));
        assert_eq!(engine.name(), "alpha-beta (depth 1)");
    }

    #[test]
    fn test_random_player_on_finished_game() {
        let state = GameState::from_parts(
            &GameConfig::default(),
            SideMap::from_pair(Position::new(8, 4), Position::new(3, 4)),
            &[],
            SideMap::with_value(10),
            Side::Black,
        )
        .unwrap();

        let err = RandomPlayer::new(0).choose_move(&state, Side::Black).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState { .. }));
    }
}
