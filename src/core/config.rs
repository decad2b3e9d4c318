//! Board configuration.
//!
//! The classic game is 9×9 with ten walls per side and pawns starting in the
//! middle of their home rows. All of these are parameters; `GameConfig::validate`
//! enforces the limits the engine relies on.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::player::Side;
use super::position::Position;
use super::wall::MAX_ANCHOR;

/// Smallest board the engine accepts.
pub const MIN_BOARD_SIZE: u8 = 3;

/// Largest board the engine accepts. Wall anchors are 3-bit fields in the
/// move codec, so the gap grid cannot exceed 8×8.
pub const MAX_BOARD_SIZE: u8 = MAX_ANCHOR + 2;

/// Static description of a board: size, wall supply and start cells.
///
/// When deserialized, missing start cells are centred on the home rows of
/// the given board size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GameConfigFile")]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_size: u8,

    /// Walls each side starts with.
    pub walls_per_player: u8,

    /// White's starting cell.
    pub white_start: Position,

    /// Black's starting cell.
    pub black_start: Position,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            walls_per_player: 10,
            white_start: Position::new(0, 4),
            black_start: Position::new(8, 4),
        }
    }
}

/// On-disk form of [`GameConfig`]; every key is optional.
#[derive(Deserialize)]
#[serde(default)]
struct GameConfigFile {
    board_size: u8,
    walls_per_player: u8,
    white_start: Option<Position>,
    black_start: Option<Position>,
}

impl Default for GameConfigFile {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            board_size: config.board_size,
            walls_per_player: config.walls_per_player,
            white_start: None,
            black_start: None,
        }
    }
}

impl From<GameConfigFile> for GameConfig {
    fn from(file: GameConfigFile) -> Self {
        let centred = GameConfig::default()
            .with_board_size(file.board_size)
            .with_walls_per_player(file.walls_per_player);
        Self {
            white_start: file.white_start.unwrap_or(centred.white_start),
            black_start: file.black_start.unwrap_or(centred.black_start),
            ..centred
        }
    }
}

impl GameConfig {
    /// Set the board size, re-centring both start cells on their home rows.
    #[must_use]
    pub fn with_board_size(mut self, board_size: u8) -> Self {
        let mid = board_size / 2;
        self.board_size = board_size;
        self.white_start = Position::new(0, mid);
        self.black_start = Position::new(board_size.saturating_sub(1), mid);
        self
    }

    /// Set the walls each side starts with.
    #[must_use]
    pub fn with_walls_per_player(mut self, walls: u8) -> Self {
        self.walls_per_player = walls;
        self
    }

    /// Set both start cells.
    #[must_use]
    pub fn with_starts(mut self, white: Position, black: Position) -> Self {
        self.white_start = white;
        self.black_start = black;
        self
    }

    /// Start cell for a side.
    #[must_use]
    pub fn start(&self, side: Side) -> Position {
        match side {
            Side::White => self.white_start,
            Side::Black => self.black_start,
        }
    }

    /// Total walls in play across both sides.
    #[must_use]
    pub fn total_walls(&self) -> u16 {
        self.walls_per_player as u16 * 2
    }

    /// Check the configuration against the engine's limits.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(EngineError::invalid_config(format!(
                "board size {} outside {}..={}",
                self.board_size, MIN_BOARD_SIZE, MAX_BOARD_SIZE
            )));
        }
        for side in Side::ALL {
            let start = self.start(side);
            if !start.in_bounds(self.board_size) {
                return Err(EngineError::invalid_config(format!(
                    "{} start {} is off the board",
                    side, start
                )));
            }
            if start.row == side.goal_row(self.board_size) {
                return Err(EngineError::invalid_config(format!(
                    "{} start {} is already on its goal row",
                    side, start
                )));
            }
        }
        if self.white_start == self.black_start {
            return Err(EngineError::invalid_config(
                "both pawns start on the same cell",
            ));
        }
        Ok(())
    }
}
