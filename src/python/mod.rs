//! Python bindings for the engine boundary.
//!
//! # Quick Start
//!
//! ```python
//! import quoridor_engine as q
//!
//! codes = q.legal_moves((0, 4), (8, 4), [], 10, 10, True)
//! code = q.best_move((0, 4), (8, 4), [], 10, 10, True, budget=2, unit="depth")
//! print(q.Move.from_code(code))
//!
//! game = q.Match()
//! game.submit(code)
//! ```

use pyo3::prelude::*;

use crate::core::EngineError;

mod py_core;
mod py_engine;

pub use py_core::*;
pub use py_engine::*;

/// Engine errors surface as `ValueError`.
pub(crate) fn to_py_err(err: EngineError) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
}

/// quoridor_engine: Quoridor rules and move search.
#[pymodule]
fn quoridor_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMove>()?;
    m.add_class::<PyMatch>()?;
    m.add_function(wrap_pyfunction!(legal_moves, m)?)?;
    m.add_function(wrap_pyfunction!(best_move, m)?)?;
    Ok(())
}
