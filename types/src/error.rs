//! Error types for matrix construction.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("matrix has no elements")]
    Empty,

    #[error("matrix is not square: row {row} has {len} elements, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
}
