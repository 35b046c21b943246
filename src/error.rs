use thiserror::Error;

use crate::cell::Cell;

/// Reasons a search could not be carried out. An unreachable goal is not an error;
/// it is reported as `Ok(None)` by the search functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("grid has no cells ({rows} x {cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("{rows} x {cols} grid exceeds the largest supported side of {max} cells")]
    GridTooLarge { rows: usize, cols: usize, max: usize },
    #[error("{cell} lies outside the {rows} x {cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },
    #[error("{cell} is blocked")]
    Blocked { cell: Cell },
    #[error("search aborted after expanding {expansions} nodes")]
    Aborted { expansions: usize },
}

/// Failure to read a grid from its character map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidChar { ch: char, row: usize, col: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
