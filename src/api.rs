//! Byte-level engine boundary.
//!
//! A match controller hands the engine a plain description of the position
//! and gets move codes back. Nothing is kept between calls.
//!
//! ```
//! use quoridor_engine::api::{self, EngineQuery};
//! use quoridor_engine::codec;
//! use quoridor_engine::core::{GameConfig, Move};
//!
//! let query = EngineQuery::opening(&GameConfig::default(), true);
//! let codes = api::legal_moves(&query, &GameConfig::default()).unwrap();
//! assert!(codes.contains(&codec::encode(Move::pawn(1, 0))));
//! ```

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::codec;
use crate::core::{GameConfig, GameState, Position, Result, Side, SideMap, WallSlot};
use crate::rules::{Quoridor, RulesEngine};
use crate::search::{self, SearchConfig};

/// A position as the match controller sees it.
///
/// Wall order carries no meaning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineQuery {
    pub white_pawn: Position,
    pub black_pawn: Position,
    pub walls: Vec<WallSlot>,
    pub white_walls_remaining: u8,
    pub black_walls_remaining: u8,
    /// Side asking for moves.
    pub is_white: bool,
}

impl EngineQuery {
    /// The starting position of `config`.
    #[must_use]
    pub fn opening(config: &GameConfig, is_white: bool) -> Self {
        Self {
            white_pawn: config.white_start,
            black_pawn: config.black_start,
            walls: Vec::new(),
            white_walls_remaining: config.walls_per_player,
            black_walls_remaining: config.walls_per_player,
            is_white,
        }
    }

    /// Describe an existing state from the point of view of `side`.
    #[must_use]
    pub fn from_state(state: &GameState, side: Side) -> Self {
        Self {
            white_pawn: state.pawn(Side::White),
            black_pawn: state.pawn(Side::Black),
            walls: state.walls().iter().copied().collect(),
            white_walls_remaining: state.walls_remaining(Side::White),
            black_walls_remaining: state.walls_remaining(Side::Black),
            is_white: side.is_white(),
        }
    }

    /// Side the query asks for.
    #[must_use]
    pub fn side(&self) -> Side {
        Side::from_is_white(self.is_white)
    }

    /// Build and validate the state this query describes.
    ///
    /// Fails with `InvalidState` when the description breaks a board
    /// invariant (overlapping walls, wall counts that do not add up, pawns
    /// off the board or on the same cell).
    pub fn to_state(&self, config: &GameConfig) -> Result<GameState> {
        GameState::from_parts(
            config,
            SideMap::from_pair(self.white_pawn, self.black_pawn),
            &self.walls,
            SideMap::from_pair(self.white_walls_remaining, self.black_walls_remaining),
            self.side(),
        )
    }
}

/// Every legal move for the querying side, as move codes.
///
/// Empty when a pawn already stands on its goal row.
pub fn legal_moves(query: &EngineQuery, config: &GameConfig) -> Result<Vec<u8>> {
    let state = query.to_state(config)?;
    let rules = Quoridor::new(config.clone())?;
    Ok(codec::encode_all(&rules.legal_moves(&state, query.side())))
}

/// The searched best move for the querying side, as a move code.
#[instrument(skip_all, fields(side = %query.side(), walls = query.walls.len()))]
pub fn best_move(query: &EngineQuery, config: &GameConfig, search: &SearchConfig) -> Result<u8> {
    let state = query.to_state(config)?;
    let mv = search::best_move(&state, query.side(), search)?;
    Ok(codec::encode(mv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineError, Move};
    use crate::search::SearchBudget;

    #[test]
    fn test_opening_legal_moves() {
        let config = GameConfig::default();
        let codes = legal_moves(&EngineQuery::opening(&config, true), &config).unwrap();

        assert_eq!(codes.len(), 3 + 128);
        assert!(codes.contains(&24));
        assert!(!codes.contains(&16));
    }

    #[test]
    fn test_wall_order_irrelevant() {
        let config = GameConfig::default();
        let mut query = EngineQuery::opening(&config, false);
        query.walls = vec![WallSlot::horizontal(2, 2), WallSlot::vertical(5, 5)];
        query.white_walls_remaining = 9;
        query.black_walls_remaining = 9;

        let mut reversed = query.clone();
        reversed.walls.reverse();

        let mut a = legal_moves(&query, &config).unwrap();
        let mut b = legal_moves(&reversed, &config).unwrap();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_inconsistent_wall_counts_rejected() {
        let config = GameConfig::default();
        let mut query = EngineQuery::opening(&config, true);
        query.walls.push(WallSlot::horizontal(4, 4));

        assert!(matches!(
            legal_moves(&query, &config),
            Err(EngineError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_terminal_query_has_no_moves() {
        let config = GameConfig::default();
        let mut query = EngineQuery::opening(&config, false);
        query.white_pawn = Position::new(8, 0);

        assert!(legal_moves(&query, &config).unwrap().is_empty());
    }

    #[test]
    fn test_best_move_code_is_legal() {
        let config = GameConfig::default();
        let query = EngineQuery::opening(&config, true);
        let search = SearchConfig::default().with_budget(SearchBudget::Nodes(200));

        let code = best_move(&query, &config, &search).unwrap();
        assert!(legal_moves(&query, &config).unwrap().contains(&code));
        assert!(codec::decode(code).is_pawn() || codec::decode(code).is_wall());
    }

    #[test]
    fn test_from_state_round_trip() {
        let rules = Quoridor::default();
        let mut state = rules.initial_state().unwrap();
        rules.apply_move(&mut state, Side::White, Move::WallPlacement(WallSlot::vertical(1, 1)));

        let query = EngineQuery::from_state(&state, Side::Black);
        assert_eq!(query.to_state(rules.config()).unwrap(), state);
    }
}
