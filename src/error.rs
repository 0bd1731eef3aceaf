use std::io;
use thiserror::Error;

/// Errors raised while building a puzzle from caller input. An unsolvable
/// puzzle is not an error; `Solver::solve` reports that as `None`.
#[derive(Error, Debug)]
pub enum FillError {
    #[error("structure has no fillable rows")]
    EmptyStructure,

    #[error("structure row {row} has width {found}, expected {expected}")]
    RaggedStructure {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("slot at ({row}, {col}) does not fit in the {height}x{width} grid")]
    SlotOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, FillError>;
