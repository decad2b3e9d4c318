//! Core type bindings for Python.

use pyo3::prelude::*;

use crate::codec;
use crate::core::{Move, Orientation, WallSlot};

use super::to_py_err;

/// Python wrapper for Move.
#[pyclass(name = "Move")]
#[derive(Clone, Debug)]
pub struct PyMove(pub Move);

#[pymethods]
impl PyMove {
    /// Pawn displacement.
    #[staticmethod]
    fn pawn(d_row: i8, d_col: i8) -> Self {
        Self(Move::pawn(d_row, d_col))
    }

    /// Wall anchored at (row, col).
    #[staticmethod]
    fn wall(horizontal: bool, row: u8, col: u8) -> Self {
        let orientation = if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        Self(Move::WallPlacement(WallSlot::new(orientation, row, col)))
    }

    /// Decode a move code, rejecting codes that are not moves on the board.
    #[staticmethod]
    #[pyo3(signature = (code, board_size = 9))]
    fn from_code(code: u8, board_size: u8) -> PyResult<Self> {
        codec::decode_checked(code, board_size)
            .map(Self)
            .map_err(to_py_err)
    }

    #[getter]
    fn code(&self) -> u8 {
        codec::encode(self.0)
    }

    #[getter]
    fn is_wall(&self) -> bool {
        self.0.is_wall()
    }

    fn __repr__(&self) -> String {
        self.0.to_string()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        codec::encode(self.0) as u64
    }
}
