//! The block-level operations offered by a compute backend.

use async_trait::async_trait;
use block_mult_types::Matrix;

use crate::Error;

/// Block multiply and add, executed by some backend.
///
/// Both operands are square blocks of the same dimension and the result has
/// that dimension too. Implementations must allow overlapping calls from
/// concurrent tasks on a shared instance.
#[async_trait]
pub trait BlockPrimitives: Send + Sync {
    /// Returns the matrix product `a · b`.
    async fn multiply_block(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, Error>;

    /// Returns the element-wise sum `a + b`.
    async fn add_block(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, Error>;
}
