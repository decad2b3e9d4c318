//! Engine boundary and match bindings for Python.

use pyo3::prelude::*;

use crate::api::{self, EngineQuery};
use crate::controller::Match;
use crate::core::{GameConfig, Orientation, Position, WallSlot};
use crate::search::{SearchBudget, SearchConfig, Strategy};

use super::py_core::PyMove;
use super::to_py_err;

fn query(
    white_pawn: (u8, u8),
    black_pawn: (u8, u8),
    walls: Vec<(bool, u8, u8)>,
    white_walls_remaining: u8,
    black_walls_remaining: u8,
    is_white: bool,
) -> EngineQuery {
    EngineQuery {
        white_pawn: Position::new(white_pawn.0, white_pawn.1),
        black_pawn: Position::new(black_pawn.0, black_pawn.1),
        walls: walls
            .into_iter()
            .map(|(horizontal, row, col)| {
                let orientation = if horizontal {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                WallSlot::new(orientation, row, col)
            })
            .collect(),
        white_walls_remaining,
        black_walls_remaining,
        is_white,
    }
}

fn search_config(budget: u64, unit: &str, strategy: &str) -> PyResult<SearchConfig> {
    let budget = match unit {
        "depth" => SearchBudget::Depth(budget.min(u32::MAX as u64) as u32),
        "nodes" => SearchBudget::Nodes(budget),
        "time_ms" => SearchBudget::TimeMs(budget),
        other => {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "unknown budget unit {:?}, expected depth, nodes or time_ms",
                other
            )))
        }
    };
    let strategy = match strategy {
        "alpha_beta" => Strategy::AlphaBeta,
        "mcts" => Strategy::Mcts,
        other => {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "unknown strategy {:?}, expected alpha_beta or mcts",
                other
            )))
        }
    };
    Ok(SearchConfig::default()
        .with_budget(budget)
        .with_strategy(strategy))
}

/// Legal move codes for the querying side.
///
/// Walls are `(horizontal, row, col)` tuples in any order.
#[pyfunction]
#[pyo3(signature = (
    white_pawn,
    black_pawn,
    walls,
    white_walls_remaining,
    black_walls_remaining,
    is_white
))]
pub fn legal_moves(
    white_pawn: (u8, u8),
    black_pawn: (u8, u8),
    walls: Vec<(bool, u8, u8)>,
    white_walls_remaining: u8,
    black_walls_remaining: u8,
    is_white: bool,
) -> PyResult<Vec<u8>> {
    let query = query(
        white_pawn,
        black_pawn,
        walls,
        white_walls_remaining,
        black_walls_remaining,
        is_white,
    );
    api::legal_moves(&query, &GameConfig::default()).map_err(to_py_err)
}

/// Best move code for the querying side.
///
/// `unit` is one of "depth", "nodes" or "time_ms".
#[pyfunction]
#[pyo3(signature = (
    white_pawn,
    black_pawn,
    walls,
    white_walls_remaining,
    black_walls_remaining,
    is_white,
    budget = 50_000,
    unit = "nodes",
    strategy = "alpha_beta"
))]
#[allow(clippy::too_many_arguments)]
pub fn best_move(
    py: Python<'_>,
    white_pawn: (u8, u8),
    black_pawn: (u8, u8),
    walls: Vec<(bool, u8, u8)>,
    white_walls_remaining: u8,
    black_walls_remaining: u8,
    is_white: bool,
    budget: u64,
    unit: &str,
    strategy: &str,
) -> PyResult<u8> {
    let query = query(
        white_pawn,
        black_pawn,
        walls,
        white_walls_remaining,
        black_walls_remaining,
        is_white,
    );
    let search = search_config(budget, unit, strategy)?;
    py.allow_threads(|| api::best_move(&query, &GameConfig::default(), &search))
        .map_err(to_py_err)
}

/// Python wrapper for a match in progress.
#[pyclass(name = "Match")]
pub struct PyMatch(pub Match);

#[pymethods]
impl PyMatch {
    #[new]
    #[pyo3(signature = (board_size = 9, walls_per_player = 10))]
    fn new(board_size: u8, walls_per_player: u8) -> PyResult<Self> {
        let config = GameConfig::default()
            .with_board_size(board_size)
            .with_walls_per_player(walls_per_player);
        Match::new(config).map(Self).map_err(to_py_err)
    }

    /// Submit a move code for the side to move.
    fn submit(&mut self, code: u8) -> PyResult<PyMove> {
        self.0.submit_code(code).map(PyMove).map_err(to_py_err)
    }

    fn legal_moves(&self) -> Vec<u8> {
        crate::codec::encode_all(&self.0.legal_moves())
    }

    /// Code of the move taken back, or None.
    fn undo(&mut self) -> Option<u8> {
        self.0.undo().map(|record| crate::codec::encode(record.mv))
    }

    #[getter]
    fn is_white_to_move(&self) -> bool {
        self.0.side_to_move().is_white()
    }

    /// "white", "black" or None.
    #[getter]
    fn winner(&self) -> Option<String> {
        self.0.winner().map(|side| side.to_string().to_lowercase())
    }

    /// Save the transcript under a timestamped name in `directory`.
    fn save(&self, directory: &str) -> PyResult<String> {
        self.0
            .transcript()
            .save_in_dir(directory)
            .map(|path| path.display().to_string())
            .map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        self.0.state().to_string()
    }
}
