//! Standard Quoridor rules.

use crate::core::{GameConfig, GameState, Move, Result, Side};

use super::engine::{GameResult, RulesEngine};
use super::{pawn, walls};

/// Quoridor rules for a validated board configuration.
#[derive(Clone, Debug, Default)]
pub struct Quoridor {
    config: GameConfig,
}

impl Quoridor {
    /// Create the rules for `config`, rejecting unsupported boards.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Rules matching the dimensions of an existing state.
    #[must_use]
    pub fn for_state(state: &GameState) -> Self {
        Self {
            config: GameConfig::default()
                .with_board_size(state.board_size())
                .with_walls_per_player(state.walls_per_player()),
        }
    }

    /// Starting position for this configuration.
    pub fn initial_state(&self) -> Result<GameState> {
        GameState::new(&self.config)
    }

    /// Pawn moves only.
    #[must_use]
    pub fn pawn_moves(&self, state: &GameState, side: Side) -> Vec<Move> {
        if state.is_terminal() {
            return Vec::new();
        }
        pawn::pawn_moves(state, side).into_vec()
    }

    /// Pawn moves followed by the probable wall placements that pass the path check.
    ///
    /// A pruned move list for search nodes below the root.
    #[must_use]
    pub fn probable_moves(&self, state: &GameState, side: Side) -> Vec<Move> {
        if state.is_terminal() {
            return Vec::new();
        }
        let mut moves = pawn::pawn_moves(state, side).into_vec();
        moves.extend(
            walls::probable_walls(state, side)
                .into_iter()
                .filter(|&slot| walls::keeps_paths_open(state, slot))
                .map(Move::WallPlacement),
        );
        moves
    }
}

impl RulesEngine for Quoridor {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_moves(&self, state: &GameState, side: Side) -> Vec<Move> {
        if state.is_terminal() {
            return Vec::new();
        }
        let mut moves = pawn::pawn_moves(state, side).into_vec();
        moves.extend(walls::wall_moves(state, side));
        moves
    }

    fn apply_move(&self, state: &mut GameState, side: Side, mv: Move) {
        state.apply_unchecked(mv, side);
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.winner().map(GameResult::new)
    }

    fn candidate_moves(&self, state: &GameState, side: Side) -> Vec<Move> {
        self.probable_moves(state, side)
    }

    fn is_legal(&self, state: &GameState, side: Side, mv: Move) -> bool {
        if state.is_terminal() {
            return false;
        }
        match mv {
            Move::PawnStep { .. } => pawn::pawn_moves(state, side).contains(&mv),
            Move::WallPlacement(slot) => walls::is_legal_wall(state, side, slot),
        }
    }
}
