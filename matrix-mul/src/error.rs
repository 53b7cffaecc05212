//! Error types for matrix-mul operations.

use thiserror::Error;

use crate::quadrant::Quadrant;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("quadrant shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("remote block operation failed: {0}")]
    RemoteOperation(#[from] block_client::Error),

    #[error("no result for quadrant {0:?}")]
    MissingQuadrant(Quadrant),

    #[error("quadrant task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
