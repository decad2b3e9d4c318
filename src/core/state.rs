//! Game state: pawns, walls, wall supply, turn and winner.
//!
//! ## Invariants
//!
//! - the board size is within the supported range
//! - both pawns are on the board and on different cells
//! - the occupancy grid holds exactly the placed walls
//! - placed walls are in bounds and pairwise non-overlapping
//! - `walls placed + walls remaining (both sides) == 2 * walls_per_player`
//! - `winner` is set exactly when a pawn stands on its goal row, and a state
//!   with a winner accepts no further moves
//!
//! ## Cloning
//!
//! The placed-wall list is an `im::Vector`, so cloning a state during search
//! is O(1) and the occupancy grid is two machine words.

use std::hash::{Hash, Hasher};

use im::Vector;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::Move;
use super::config::{GameConfig, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use super::error::{EngineError, Result};
use super::player::{Side, SideMap};
use super::position::Position;
use super::wall::{WallGrid, WallSlot};

/// Complete state of a Quoridor game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board_size: u8,
    walls_per_player: u8,
    pawns: SideMap<Position>,
    walls_remaining: SideMap<u8>,
    /// Placed walls in placement order.
    walls: Vector<WallSlot>,
    grid: WallGrid,
    to_move: Side,
    winner: Option<Side>,
}

impl GameState {
    /// Starting position for a configuration. White moves first.
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board_size: config.board_size,
            walls_per_player: config.walls_per_player,
            pawns: SideMap::from_pair(config.white_start, config.black_start),
            walls_remaining: SideMap::with_value(config.walls_per_player),
            walls: Vector::new(),
            grid: WallGrid::new(),
            to_move: Side::White,
            winner: None,
        })
    }

    /// Build a state from its parts, checking every invariant.
    ///
    /// The winner is derived from the pawn rows. Wall order is kept as given.
    pub fn from_parts(
        config: &GameConfig,
        pawns: SideMap<Position>,
        walls: &[WallSlot],
        walls_remaining: SideMap<u8>,
        to_move: Side,
    ) -> Result<Self> {
        config.validate()?;

        let mut grid = WallGrid::new();
        for &slot in walls {
            if !slot.in_bounds(config.board_size) {
                return Err(EngineError::invalid_state(format!(
                    "wall {} is off the board",
                    slot
                )));
            }
            if grid.overlaps(slot) {
                return Err(EngineError::invalid_state(format!(
                    "wall {} overlaps another wall",
                    slot
                )));
            }
            grid.insert(slot);
        }

        let mut state = Self {
            board_size: config.board_size,
            walls_per_player: config.walls_per_player,
            pawns,
            walls_remaining,
            walls: walls.iter().copied().collect(),
            grid,
            to_move,
            winner: None,
        };
        state.winner = state.goal_reached();
        state.check_invariants()?;
        Ok(state)
    }

    fn goal_reached(&self) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.pawns[side].row == side.goal_row(self.board_size))
    }

    /// Verify the structural invariants listed in the module docs.
    pub fn check_invariants(&self) -> Result<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(EngineError::invalid_state(format!(
                "board size {} outside {}..={}",
                self.board_size, MIN_BOARD_SIZE, MAX_BOARD_SIZE
            )));
        }
        for (side, pawn) in self.pawns.iter() {
            if !pawn.in_bounds(self.board_size) {
                return Err(EngineError::invalid_state(format!(
                    "{} pawn {} is off the board",
                    side, pawn
                )));
            }
        }
        if self.pawns[Side::White] == self.pawns[Side::Black] {
            return Err(EngineError::invalid_state("both pawns on the same cell"));
        }

        let at_goal: Vec<Side> = Side::ALL
            .into_iter()
            .filter(|&side| self.pawns[side].row == side.goal_row(self.board_size))
            .collect();
        if at_goal.len() > 1 {
            return Err(EngineError::invalid_state("both pawns on their goal rows"));
        }
        if self.winner != at_goal.first().copied() {
            return Err(EngineError::invalid_state("winner does not match pawn rows"));
        }

        for (side, &remaining) in self.walls_remaining.iter() {
            if remaining > self.walls_per_player {
                return Err(EngineError::invalid_state(format!(
                    "{} has {} walls, more than the {} allowed",
                    side, remaining, self.walls_per_player
                )));
            }
        }
        let accounted = self.walls.len()
            + self.walls_remaining[Side::White] as usize
            + self.walls_remaining[Side::Black] as usize;
        let total = self.walls_per_player as usize * 2;
        let mut placed: Vec<WallSlot> = self.walls.iter().copied().collect();
        placed.sort_unstable();
        if !self.grid.iter().eq(placed.iter().copied()) {
            return Err(EngineError::invalid_state(
                "wall grid does not match the placed walls",
            ));
        }
        if accounted != total || self.grid.len() != self.walls.len() {
            return Err(EngineError::invalid_state(format!(
                "{} walls placed and {} in hand, expected {} in total",
                self.walls.len(),
                accounted - self.walls.len(),
                total
            )));
        }
        Ok(())
    }

    // === Accessors ===

    /// Side length of the board.
    #[must_use]
    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    /// Walls each side started with.
    #[must_use]
    pub fn walls_per_player(&self) -> u8 {
        self.walls_per_player
    }

    /// Cell of `side`'s pawn.
    #[must_use]
    pub fn pawn(&self, side: Side) -> Position {
        self.pawns[side]
    }

    /// Both pawn cells.
    #[must_use]
    pub fn pawns(&self) -> &SideMap<Position> {
        &self.pawns
    }

    /// Walls `side` still holds.
    #[must_use]
    pub fn walls_remaining(&self, side: Side) -> u8 {
        self.walls_remaining[side]
    }

    /// Placed walls in placement order.
    #[must_use]
    pub fn walls(&self) -> &Vector<WallSlot> {
        &self.walls
    }

    /// Occupancy grid of the placed walls.
    #[must_use]
    pub fn grid(&self) -> &WallGrid {
        &self.grid
    }

    /// Side expected to move next.
    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Side whose pawn reached its goal row, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    // === Mutation ===

    /// Apply a move for `side`.
    ///
    /// Only shape is checked here (on-board destination, free cell, wall in
    /// hand, free slot); full legality belongs to the rules engine. Nothing is
    /// mutated when an error is returned.
    pub fn apply_move(&mut self, mv: Move, side: Side) -> Result<()> {
        if let Some(winner) = self.winner {
            return Err(EngineError::TerminalState { winner });
        }
        let shaped = match mv {
            Move::PawnStep { d_row, d_col } => self.pawns[side]
                .offset(d_row, d_col, self.board_size)
                .is_some_and(|to| to != self.pawns[side.opponent()] && (d_row, d_col) != (0, 0)),
            Move::WallPlacement(slot) => {
                self.walls_remaining[side] > 0
                    && slot.in_bounds(self.board_size)
                    && !self.grid.overlaps(slot)
            }
        };
        if !shaped {
            return Err(EngineError::IllegalMove { mv, side });
        }
        self.apply_unchecked(mv, side);
        Ok(())
    }

    /// Apply a move the rules engine has already validated.
    pub(crate) fn apply_unchecked(&mut self, mv: Move, side: Side) {
        match mv {
            Move::PawnStep { d_row, d_col } => {
                let from = self.pawns[side];
                let to = Position::new(
                    (from.row as i8 + d_row) as u8,
                    (from.col as i8 + d_col) as u8,
                );
                self.pawns[side] = to;
                if to.row == side.goal_row(self.board_size) {
                    self.winner = Some(side);
                    debug!(%side, cell = %to, "goal row reached");
                }
            }
            Move::WallPlacement(slot) => {
                self.walls.push_back(slot);
                self.grid.insert(slot);
                self.walls_remaining[side] -= 1;
            }
        }
        self.to_move = side.opponent();
    }

    /// Copy of this state with a different side to move.
    #[must_use]
    pub fn with_to_move(mut self, side: Side) -> Self {
        self.to_move = side;
        self
    }

    // === Hashing and snapshots ===

    /// 64-bit position key. Independent of wall placement order.
    #[must_use]
    pub fn key(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.pawns.hash(&mut hasher);
        self.walls_remaining.hash(&mut hasher);
        self.grid.masks().hash(&mut hasher);
        self.to_move.hash(&mut hasher);
        hasher.finish()
    }

    /// Encode the state as a compact binary snapshot.
    pub fn to_snapshot(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by [`GameState::to_snapshot`].
    ///
    /// The state is rebuilt from its parts, so the grid is derived from the
    /// wall list and every invariant is checked again.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
        let decoded: GameState = bincode::deserialize(bytes)?;
        let config = GameConfig::default()
            .with_board_size(decoded.board_size)
            .with_walls_per_player(decoded.walls_per_player);
        let walls: Vec<WallSlot> = decoded.walls.iter().copied().collect();
        let state = Self::from_parts(
            &config,
            decoded.pawns,
            &walls,
            decoded.walls_remaining,
            decoded.to_move,
        )?;
        if state.grid != decoded.grid {
            return Err(EngineError::invalid_state(
                "snapshot grid does not match its wall list",
            ));
        }
        Ok(state)
    }
}

impl std::fmt::Display for GameState {
    /// Text board: `W`/`B` pawns, `-` and `|` for walls, `.` for empty cells.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use super::position::Direction;

        let n = self.board_size;
        for row in 0..n {
            let mut cells = String::new();
            let mut gaps = String::new();
            for col in 0..n {
                let here = Position::new(row, col);
                cells.push(if here == self.pawns[Side::White] {
                    'W'
                } else if here == self.pawns[Side::Black] {
                    'B'
                } else {
                    '.'
                });
                if col + 1 < n {
                    cells.push(if self.grid.blocks(here, Direction::East) { '|' } else { ' ' });
                }
                gaps.push(if self.grid.blocks(here, Direction::South) { '-' } else { ' ' });
                if col + 1 < n {
                    gaps.push(' ');
                }
            }
            writeln!(f, "{}", cells)?;
            if row + 1 < n {
                writeln!(f, "{}", gaps)?;
            }
        }
        write!(
            f,
            "walls: White {} / Black {}, to move: {}",
            self.walls_remaining[Side::White],
            self.walls_remaining[Side::Black],
            self.to_move
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial() -> GameState {
        GameState::new(&GameConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = initial();
        assert_eq!(state.pawn(Side::White), Position::new(0, 4));
        assert_eq!(state.pawn(Side::Black), Position::new(8, 4));
        assert_eq!(state.walls_remaining(Side::White), 10);
        assert_eq!(state.walls_remaining(Side::Black), 10);
        assert!(state.walls().is_empty());
        assert_eq!(state.to_move(), Side::White);
        assert!(!state.is_terminal());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_apply_pawn_step() {
        let mut state = initial();
        state.apply_move(Move::pawn(1, 0), Side::White).unwrap();

        assert_eq!(state.pawn(Side::White), Position::new(1, 4));
        assert_eq!(state.to_move(), Side::Black);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_apply_wall_decrements_supply() {
        let mut state = initial();
        let slot = WallSlot::horizontal(3, 3);
        state.apply_move(Move::WallPlacement(slot), Side::Black).unwrap();

        assert_eq!(state.walls_remaining(Side::Black), 9);
        assert_eq!(state.walls_remaining(Side::White), 10);
        assert_eq!(state.walls().len(), 1);
        assert!(state.grid().contains(slot));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_white_wins_on_last_row() {
        let config = GameConfig::default();
        let mut state = GameState::from_parts(
            &config,
            SideMap::from_pair(Position::new(7, 4), Position::new(2, 2)),
            &[],
            SideMap::with_value(10),
            Side::White,
        )
        .unwrap();

        state.apply_move(Move::pawn(1, 0), Side::White).unwrap();
        assert_eq!(state.winner(), Some(Side::White));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_black_wins_on_first_row() {
        let config = GameConfig::default();
        let mut state = GameState::from_parts(
            &config,
            SideMap::from_pair(Position::new(4, 0), Position::new(1, 6)),
            &[],
            SideMap::with_value(10),
            Side::Black,
        )
        .unwrap();

        state.apply_move(Move::pawn(-1, 0), Side::Black).unwrap();
        assert_eq!(state.winner(), Some(Side::Black));
    }

    #[test]
    fn test_terminal_state_rejects_moves() {
        let config = GameConfig::default();
        let mut state = GameState::from_parts(
            &config,
            SideMap::from_pair(Position::new(8, 1), Position::new(3, 3)),
            &[],
            SideMap::with_value(10),
            Side::Black,
        )
        .unwrap();
        assert_eq!(state.winner(), Some(Side::White));

        let before = state.clone();
        let err = state.apply_move(Move::pawn(1, 0), Side::Black).unwrap_err();
        assert!(matches!(err, EngineError::TerminalState { winner: Side::White }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_rejects_misshapen_moves() {
        let mut state = initial();
        let before = state.clone();

        assert!(state.apply_move(Move::pawn(-1, 0), Side::White).is_err());
        assert!(state.apply_move(Move::pawn(0, 0), Side::White).is_err());
        assert!(state
            .apply_move(Move::WallPlacement(WallSlot::horizontal(8, 0)), Side::White)
            .is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_from_parts_rejects_overlap() {
        let config = GameConfig::default();
        let err = GameState::from_parts(
            &config,
            SideMap::from_pair(Position::new(0, 4), Position::new(8, 4)),
            &[WallSlot::horizontal(2, 2), WallSlot::vertical(2, 2)],
            SideMap::from_pair(9, 9),
            Side::White,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidState { .. }));
    }

    #[test]
    fn test_from_parts_rejects_bad_wall_count() {
        let config = GameConfig::default();
        let result = GameState::from_parts(
            &config,
            SideMap::from_pair(Position::new(0, 4), Position::new(8, 4)),
            &[WallSlot::horizontal(2, 2)],
            SideMap::from_pair(10, 10),
            Side::White,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_key_ignores_wall_order() {
        let config = GameConfig::default();
        let pawns = SideMap::from_pair(Position::new(0, 4), Position::new(8, 4));
        let a = GameState::from_parts(
            &config,
            pawns,
            &[WallSlot::horizontal(1, 1), WallSlot::vertical(5, 5)],
            SideMap::from_pair(9, 9),
            Side::White,
        )
        .unwrap();
        let b = GameState::from_parts(
            &config,
            pawns,
            &[WallSlot::vertical(5, 5), WallSlot::horizontal(1, 1)],
            SideMap::from_pair(9, 9),
            Side::White,
        )
        .unwrap();

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), b.clone().with_to_move(Side::Black).key());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = initial();
        state
            .apply_move(Move::WallPlacement(WallSlot::vertical(4, 4)), Side::White)
            .unwrap();
        state.apply_move(Move::pawn(-1, 0), Side::Black).unwrap();

        let bytes = state.to_snapshot().unwrap();
        let restored = GameState::from_snapshot(&bytes).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_snapshot_rejects_oversized_board() {
        let mut forged = initial();
        forged.board_size = 20;
        forged.pawns[Side::Black] = Position::new(19, 10);
        assert!(forged.check_invariants().is_err());

        let bytes = forged.to_snapshot().unwrap();
        assert!(GameState::from_snapshot(&bytes).is_err());
    }

    #[test]
    fn test_snapshot_rejects_mismatched_grid() {
        let mut state = initial();
        state
            .apply_move(Move::WallPlacement(WallSlot::horizontal(0, 3)), Side::White)
            .unwrap();

        let mut forged = state.clone();
        forged.grid = WallGrid::new();
        forged.grid.insert(WallSlot::horizontal(5, 5));
        assert!(forged.check_invariants().is_err());

        let bytes = forged.to_snapshot().unwrap();
        assert!(matches!(
            GameState::from_snapshot(&bytes),
            Err(EngineError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_display_marks_pawns_and_walls() {
        let mut state = initial();
        state
            .apply_move(Move::WallPlacement(WallSlot::horizontal(0, 0)), Side::White)
            .unwrap();
        let text = state.to_string();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some(". . . . W . . . ."));
        assert_eq!(lines.next(), Some(format!("- -{}", " ".repeat(14)).as_str()));
        assert!(text.contains("walls: White 9 / Black 10"));
    }
}
