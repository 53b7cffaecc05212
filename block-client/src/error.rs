//! Error types for block-client operations.

use block_mult_types::MatrixError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("gRPC status error: {0}")]
    Status(#[from] tonic::Status),

    #[error("block shape mismatch: {0}x{0} and {1}x{1}")]
    ShapeMismatch(usize, usize),

    #[error("reply carried no block")]
    MissingBlock,

    #[error("malformed block in reply: {0}")]
    Malformed(#[from] MatrixError),

    #[error("reply block is {got}x{got}, expected {expected}x{expected}")]
    UnexpectedSize { expected: usize, got: usize },
}
